//! Projects API server binary.
//!
//! This binary creates the concrete database implementation and passes it
//! to the API server. The API layer remains agnostic of the storage backend.

use clap::Parser;
use miette::Diagnostic;
use projects_api::api::{self, ApiError, ServeArgs, StoreBackend};
use projects_api::db::{MemoryDatabase, MongoDatabase};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(projects_api::binary::api))]
    Api(#[from] ApiError),
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let args = ServeArgs::parse();
    api::init_tracing();

    let config = args.config();
    let schema = config.options.schema();

    match args.store() {
        StoreBackend::Memory => {
            warn!("Using the in-memory store; records are lost on exit");
            api::run(config, MemoryDatabase::new(schema)).await?;
        }
        StoreBackend::Mongo(mongo) => {
            let db = MongoDatabase::connect(&mongo, schema).await;

            // Report reachability in the background; serving does not wait on it.
            if db.is_configured() {
                let pinger = db.clone();
                tokio::spawn(async move { pinger.report_connection().await });
            }

            api::run(config, db).await?;
        }
    }

    info!("Goodbye");
    Ok(())
}
