//! MongoDB ProjectRepository implementation.

use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::Collection;
use tracing::debug;

use super::ProjectDocument;
use super::connection::disconnected;
use crate::db::utils::{current_timestamp, generate_entity_id};
use crate::db::{DbResult, NewProject, Project, ProjectQuery, ProjectRepository, ProjectSchema};

/// Driver-backed project repository.
pub struct MongoProjectRepository<'a> {
    pub(crate) collection: Option<&'a Collection<ProjectDocument>>,
    pub(crate) schema: ProjectSchema,
}

impl<'a> MongoProjectRepository<'a> {
    fn collection(&self) -> DbResult<&'a Collection<ProjectDocument>> {
        self.collection.ok_or_else(disconnected)
    }
}

/// Translate a listing query into a find filter.
pub(super) fn filter_for(query: &ProjectQuery) -> Document {
    match &query.project_type {
        Some(project_type) => doc! { "type": project_type.as_str() },
        None => doc! {},
    }
}

/// Newest first; `_id` breaks ties so repeated reads agree.
pub(super) fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

impl<'a> ProjectRepository for MongoProjectRepository<'a> {
    async fn create(&self, project: NewProject) -> DbResult<Project> {
        let collection = self.collection()?;
        self.schema.validate(&project)?;

        let record = project.into_project(generate_entity_id(), current_timestamp());
        let document = ProjectDocument::try_from(&record)?;

        collection.insert_one(&document).await?;
        debug!(id = %record.id, "inserted project document");

        Ok(Project::from(document))
    }

    async fn list(&self, query: &ProjectQuery) -> DbResult<Vec<Project>> {
        let collection = self.collection()?;

        let cursor = collection
            .find(filter_for(query))
            .sort(newest_first())
            .await?;
        let documents: Vec<ProjectDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Project::from).collect())
    }
}
