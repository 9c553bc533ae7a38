//! API route configuration.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CreateProjectRequest, ErrorResponse, HealthResponse, MessageResponse, ProjectResponse,
};
use super::state::AppState;
use crate::db::Database;

/// JSON bodies larger than this are rejected before reaching a handler.
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Projects API",
        version = "0.1.0",
        description = "Store and list project showcase records",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::create_project,
        handlers::list_projects,
        handlers::list_projects_by_type,
    ),
    components(
        schemas(
            HealthResponse,
            ProjectResponse,
            CreateProjectRequest,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "projects", description = "Project listing endpoints")
    )
)]
pub struct ApiDoc;

/// Create the API router with OpenAPI documentation
///
/// `GET /projects/{type}` is only mounted when the type filter is enabled.
pub fn create_router<D: Database + 'static>(state: AppState<D>) -> Router {
    let api = ApiDoc::openapi();
    let options = state.options();

    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Project routes (generic over Database)
    let mut project_routes = routes!(D => {
        get "/projects" => handlers::list_projects,
        post "/projects" => handlers::create_project,
    });

    if options.type_filter {
        project_routes = project_routes.merge(routes!(D => {
            get "/projects/{type}" => handlers::list_projects_by_type,
        }));
    }

    let router = system_routes
        .merge(project_routes)
        .merge(Scalar::with_url("/docs", api))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state);

    if options.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
