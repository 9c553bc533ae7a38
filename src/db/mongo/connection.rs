//! MongoDB connection management.

use bson::doc;
use mongodb::{Client, Collection};
use tracing::{error, info};

use super::{MongoProjectRepository, ProjectDocument};
use crate::db::{Database, DbError, DbResult, ProjectSchema};

/// Collection holding project documents.
pub const PROJECTS_COLLECTION: &str = "projects";

/// Where to find the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// Connection string, e.g. `mongodb://127.0.0.1:27017/portfolio`.
    pub uri: String,
    /// Database used when the URI names none.
    pub database: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://127.0.0.1:27017".to_string(),
            database: "test".to_string(),
        }
    }
}

/// MongoDB database implementation.
///
/// A handle whose client could not be built stays usable: every store
/// operation then fails with [`DbError::Connection`]. Clones share the
/// driver's connection pool.
#[derive(Clone)]
pub struct MongoDatabase {
    handle: Option<MongoHandle>,
    schema: ProjectSchema,
}

#[derive(Clone)]
struct MongoHandle {
    database: mongodb::Database,
    projects: Collection<ProjectDocument>,
}

impl MongoDatabase {
    /// Build a client for the configured store.
    ///
    /// Never fails: a malformed or unresolvable URI is logged and yields a
    /// disconnected handle. The driver connects lazily, so use [`ping`] to
    /// learn whether the server is reachable.
    ///
    /// [`ping`]: MongoDatabase::ping
    pub async fn connect(config: &MongoConfig, schema: ProjectSchema) -> Self {
        let handle = match Client::with_uri_str(&config.uri).await {
            Ok(client) => {
                let database = client
                    .default_database()
                    .unwrap_or_else(|| client.database(&config.database));
                info!(database = %database.name(), "MongoDB client configured");
                let projects = database.collection::<ProjectDocument>(PROJECTS_COLLECTION);
                Some(MongoHandle { database, projects })
            }
            Err(e) => {
                error!(error = %e, "MongoDB connection error");
                None
            }
        };

        Self { handle, schema }
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> DbResult<()> {
        let handle = self.handle.as_ref().ok_or_else(disconnected)?;
        handle.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Ping the server and log the outcome.
    ///
    /// Failure is only logged; requests keep being served and fail
    /// individually until the store becomes reachable.
    pub async fn report_connection(&self) {
        match self.ping().await {
            Ok(()) => info!("Connected to MongoDB"),
            Err(e) => error!(error = %e, "MongoDB connection error"),
        }
    }

    /// Whether a client was built at all.
    pub fn is_configured(&self) -> bool {
        self.handle.is_some()
    }
}

pub(super) fn disconnected() -> DbError {
    DbError::Connection {
        message: "MongoDB client was not initialised".to_string(),
    }
}

impl Database for MongoDatabase {
    type Projects<'a> = MongoProjectRepository<'a>;

    fn schema(&self) -> ProjectSchema {
        self.schema
    }

    fn projects(&self) -> Self::Projects<'_> {
        MongoProjectRepository {
            collection: self.handle.as_ref().map(|h| &h.projects),
            schema: self.schema,
        }
    }
}
