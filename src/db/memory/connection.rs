//! In-memory database handle.

use tokio::sync::RwLock;

use super::MemoryProjectRepository;
use crate::db::{Database, Project, ProjectSchema};

/// In-memory database implementation.
pub struct MemoryDatabase {
    records: RwLock<Vec<Project>>,
    schema: ProjectSchema,
}

impl MemoryDatabase {
    /// Create an empty store enforcing the given schema.
    pub fn new(schema: ProjectSchema) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            schema,
        }
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self::new(ProjectSchema::default())
    }
}

impl Database for MemoryDatabase {
    type Projects<'a> = MemoryProjectRepository<'a>;

    fn schema(&self) -> ProjectSchema {
        self.schema
    }

    fn projects(&self) -> Self::Projects<'_> {
        MemoryProjectRepository {
            records: &self.records,
            schema: self.schema,
        }
    }
}
