//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing business logic.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{NewProject, Project, ProjectQuery, ProjectSchema},
};

/// Repository for Project operations.
///
/// Records are create-then-read-only: there is no update or delete.
pub trait ProjectRepository {
    /// Validate and insert a new project, returning the stored record.
    ///
    /// Insertion is atomic per record: a rejected candidate persists nothing.
    fn create(&self, project: NewProject) -> impl Future<Output = DbResult<Project>> + Send;

    /// List projects matching the query, newest `createdAt` first.
    fn list(&self, query: &ProjectQuery) -> impl Future<Output = DbResult<Vec<Project>>> + Send;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Projects<'a>: ProjectRepository + Send + Sync
    where
        Self: 'a;

    /// Presence rules applied on every write.
    fn schema(&self) -> ProjectSchema;

    /// Get the project repository.
    fn projects(&self) -> Self::Projects<'_>;
}
