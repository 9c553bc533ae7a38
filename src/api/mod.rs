mod config;
mod error;
mod handlers;
pub mod routes;
mod state;


use std::net::IpAddr;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::{Database, ProjectSchema};

pub use config::{ServeArgs, StoreBackend};
pub use error::ApiError;
pub use handlers::{
    CreateProjectRequest, ErrorResponse, HealthResponse, MessageResponse, ProjectResponse,
};
pub use state::AppState;

/// Port used by the loose preset when `PORT` is unset.
pub const LOOSE_DEFAULT_PORT: u16 = 5545;
/// Port used by the strict preset when `PORT` is unset.
pub const STRICT_DEFAULT_PORT: u16 = 5000;

/// Behaviour toggles covering both deployed variants of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Require every listing field except `committeeDetails`.
    pub strict_validation: bool,
    /// Expose `GET /projects/{type}`.
    pub type_filter: bool,
    /// Answer every origin with permissive CORS headers.
    pub cors: bool,
}

impl ServiceOptions {
    /// First deployed variant: optional fields, no type route, open CORS.
    pub const fn loose() -> Self {
        Self {
            strict_validation: false,
            type_filter: false,
            cors: true,
        }
    }

    /// Later variant: required fields and the type route.
    pub const fn strict() -> Self {
        Self {
            strict_validation: true,
            type_filter: true,
            cors: false,
        }
    }

    /// Schema the store should enforce for these options.
    pub fn schema(&self) -> ProjectSchema {
        ProjectSchema {
            strict: self.strict_validation,
        }
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self::loose()
    }
}

/// API server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Variant toggles
    pub options: ServiceOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: LOOSE_DEFAULT_PORT,
            options: ServiceOptions::default(),
        }
    }
}

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "projects_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration.
///
/// Serving starts immediately; the store is only touched per request.
/// Returns after a shutdown signal once in-flight requests have drained,
/// dropping the database handle.
pub async fn run<D: Database + 'static>(config: Config, db: D) -> Result<(), ApiError> {
    if db.schema() != config.options.schema() {
        warn!(
            store_strict = db.schema().strict,
            "store schema does not match strict_validation option"
        );
    }

    let state = AppState::new(db, config.options);
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(
        strict_validation = config.options.strict_validation,
        type_filter = config.options.type_filter,
        cors = config.options.cors,
        "Server running on port {}",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiError::Serve)?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
