//! In-memory ProjectRepository implementation.

use tokio::sync::RwLock;
use tracing::debug;

use crate::db::utils::{current_timestamp, generate_entity_id, sort_newest_first};
use crate::db::{DbResult, NewProject, Project, ProjectQuery, ProjectRepository, ProjectSchema};

/// Vec-backed project repository.
pub struct MemoryProjectRepository<'a> {
    pub(crate) records: &'a RwLock<Vec<Project>>,
    pub(crate) schema: ProjectSchema,
}

impl<'a> ProjectRepository for MemoryProjectRepository<'a> {
    async fn create(&self, project: NewProject) -> DbResult<Project> {
        self.schema.validate(&project)?;

        let record = project.into_project(generate_entity_id(), current_timestamp());
        self.records.write().await.push(record.clone());
        debug!(id = %record.id, "stored project in memory");

        Ok(record)
    }

    async fn list(&self, query: &ProjectQuery) -> DbResult<Vec<Project>> {
        // Walk newest insertions first so timestamp ties favour the later write.
        let mut items: Vec<Project> = self
            .records
            .read()
            .await
            .iter()
            .rev()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        sort_newest_first(&mut items);
        Ok(items)
    }
}
