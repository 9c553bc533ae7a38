//! Project listing handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::{Database, DbError, NewProject, Project, ProjectQuery, ProjectRepository};

// =============================================================================
// DTOs (Data Transfer Objects)
// =============================================================================

/// Project response DTO
///
/// Timestamps are rendered with millisecond precision (`...T10:00:00.000Z`),
/// the resolution the document store keeps, whichever backend served them.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Unique identifier assigned by the store (24-character hex)
    #[serde(rename = "_id")]
    #[schema(example = "65f1c2a9e4b0a1b2c3d4e5f6")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Campus Solar Initiative")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Rooftop panels for the library")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jane Doe")]
    pub author: Option<String>,
    /// Image URL or path
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/uploads/solar.png")]
    pub img_src: Option<String>,
    /// Classification tag
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[schema(example = "type4")]
    pub project_type: Option<String>,
    /// Committee information, used with `type4`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_details: Option<String>,
    /// Creation timestamp
    #[serde(serialize_with = "iso_millis")]
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T10:00:00.000Z")]
    pub created_at: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            author: p.author,
            img_src: p.img_src,
            project_type: p.project_type,
            committee_details: p.committee_details,
            created_at: p.created_at,
        }
    }
}

/// Create project request body.
///
/// Documents the accepted fields. The handler reads the raw JSON so unknown
/// fields are ignored and scalar values are cast the way the store expects.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[schema(example = "Campus Solar Initiative")]
    pub title: Option<String>,
    #[schema(example = "Rooftop panels for the library")]
    pub description: Option<String>,
    #[schema(example = "Jane Doe")]
    pub author: Option<String>,
    #[schema(example = "/uploads/solar.png")]
    pub img_src: Option<String>,
    #[serde(rename = "type")]
    #[schema(example = "type4")]
    pub project_type: Option<String>,
    pub committee_details: Option<String>,
}

/// Confirmation response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Project added successfully!")]
    pub message: String,
}

/// Error response DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Failed to fetch projects")]
    pub error: String,
}

pub const PROJECT_ADDED: &str = "Project added successfully!";
pub const SAVE_FAILED: &str = "Failed to save project data";
pub const FETCH_FAILED: &str = "Failed to fetch projects";
pub const FETCH_BY_TYPE_FAILED: &str = "Failed to fetch projects by type";
pub const BODY_NOT_CONTAINER: &str = "Request body must be a JSON object or array";

/// Log the store error and hide it behind a generic message.
fn internal_error<B>(e: DbError, body: B) -> (StatusCode, Json<B>) {
    error!(error = %e, "project store operation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Create a new project
///
/// Stores the listing with a server-assigned id and creation time. The
/// created record is not echoed back. A body sent without a JSON content
/// type is read as empty, so the schema alone decides whether it is stored.
#[utoipa::path(
    post,
    path = "/projects",
    tag = "projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project stored", body = MessageResponse),
        (status = 400, description = "JSON body is not an object or array", body = ErrorResponse),
        (status = 500, description = "Rejected by the store or store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_project<D: Database>(
    State(state): State<AppState<D>>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<MessageResponse>), (StatusCode, Json<ErrorResponse>)> {
    let body = match body {
        Some(Json(value)) if value.is_object() || value.is_array() => value,
        Some(Json(_)) => {
            warn!("rejecting JSON body with a scalar root");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: BODY_NOT_CONTAINER.to_string(),
                }),
            ));
        }
        None => Value::Null,
    };
    let candidate = NewProject::from_json(&body);

    let project = state.db().projects().create(candidate).await.map_err(|e| {
        internal_error(
            e,
            ErrorResponse {
                error: SAVE_FAILED.to_string(),
            },
        )
    })?;
    info!(id = %project.id, "project added");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: PROJECT_ADDED.to_string(),
        }),
    ))
}

/// List all projects
///
/// Returns every project, most recently created first
#[utoipa::path(
    get,
    path = "/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects, newest first", body = [ProjectResponse]),
        (status = 500, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects<D: Database>(
    State(state): State<AppState<D>>,
) -> Result<Json<Vec<ProjectResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let projects = state
        .db()
        .projects()
        .list(&ProjectQuery::default())
        .await
        .map_err(|e| {
            internal_error(
                e,
                ErrorResponse {
                    error: FETCH_FAILED.to_string(),
                },
            )
        })?;

    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}

/// List projects of one type
///
/// Exact match on `type`, most recently created first. No match is an
/// empty array, not a 404.
#[utoipa::path(
    get,
    path = "/projects/{type}",
    tag = "projects",
    params(
        ("type" = String, Path, description = "Classification tag, matched exactly")
    ),
    responses(
        (status = 200, description = "Matching projects, newest first", body = [ProjectResponse]),
        (status = 500, description = "Store unavailable", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_projects_by_type<D: Database>(
    State(state): State<AppState<D>>,
    Path(project_type): Path<String>,
) -> Result<Json<Vec<ProjectResponse>>, (StatusCode, Json<MessageResponse>)> {
    let projects = state
        .db()
        .projects()
        .list(&ProjectQuery::by_type(project_type))
        .await
        .map_err(|e| {
            internal_error(
                e,
                MessageResponse {
                    message: FETCH_BY_TYPE_FAILED.to_string(),
                },
            )
        })?;

    Ok(Json(
        projects.into_iter().map(ProjectResponse::from).collect(),
    ))
}
