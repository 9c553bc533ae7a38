//! Application state for the API server.

use std::sync::Arc;

use super::ServiceOptions;
use crate::db::Database;

/// Shared application state.
///
/// The database handle is injected at construction and shared read-only by
/// every handler. It is released when the last clone is dropped after
/// shutdown.
pub struct AppState<D: Database> {
    db: Arc<D>,
    options: ServiceOptions,
}

// Manual Clone impl - we only need Arc to be cloneable, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            options: self.options,
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState with the given database and options.
    pub fn new(db: D, options: ServiceOptions) -> Self {
        Self {
            db: Arc::new(db),
            options,
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Variant toggles this server was started with.
    pub fn options(&self) -> ServiceOptions {
        self.options
    }
}
