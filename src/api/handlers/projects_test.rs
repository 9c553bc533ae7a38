//! Integration tests for Project API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, SubsecRound, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, ServiceOptions, routes};
use crate::db::{MemoryDatabase, MongoConfig, MongoDatabase};

/// Create a test app with an in-memory database
fn test_app(options: ServiceOptions) -> axum::Router {
    let db = MemoryDatabase::new(options.schema());
    routes::create_router(AppState::new(db, options))
}

fn strict_app() -> axum::Router {
    test_app(ServiceOptions::strict())
}

fn loose_app() -> axum::Router {
    test_app(ServiceOptions::loose())
}

/// App whose store client could not be built.
async fn broken_store_app() -> axum::Router {
    let config = MongoConfig {
        uri: "invalid://nowhere".to_string(),
        ..MongoConfig::default()
    };
    let options = ServiceOptions::strict();
    let db = MongoDatabase::connect(&config, options.schema()).await;
    routes::create_router(AppState::new(db, options))
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn post_project(app: &axum::Router, payload: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/projects")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_raw(
    app: &axum::Router,
    content_type: Option<&str>,
    body: &'static str,
) -> axum::response::Response {
    let mut request = Request::builder().method("POST").uri("/projects");
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    app.clone()
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

async fn get(app: &axum::Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_array(app: &axum::Router, uri: &str) -> Vec<Value> {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response)
        .await
        .as_array()
        .expect("Expected array")
        .clone()
}

fn listing(title: &str, project_type: &str) -> Value {
    json!({
        "title": title,
        "description": "d",
        "author": "x",
        "imgSrc": "i",
        "type": project_type
    })
}

fn created_at(project: &Value) -> DateTime<Utc> {
    project["createdAt"]
        .as_str()
        .expect("createdAt string")
        .parse()
        .expect("RFC 3339 createdAt")
}

// =============================================================================
// POST /projects - Create Project
// =============================================================================

#[tokio::test]
async fn create_project_returns_created_message() {
    let app = strict_app();

    let response = post_project(&app, listing("A", "type1")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "message": "Project added successfully!" }));
}

#[tokio::test]
async fn created_project_appears_in_listing() {
    let app = strict_app();
    let before = Utc::now().trunc_subsecs(3);

    post_project(&app, listing("Solar", "type2")).await;

    let projects = get_array(&app, "/projects").await;
    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project["title"], "Solar");
    assert_eq!(project["description"], "d");
    assert_eq!(project["author"], "x");
    assert_eq!(project["imgSrc"], "i");
    assert_eq!(project["type"], "type2");
    assert_eq!(project["_id"].as_str().unwrap().len(), 24);
    assert!(created_at(project) >= before);
}

#[tokio::test]
async fn create_ignores_unknown_fields() {
    let app = strict_app();
    let mut payload = listing("A", "type1");
    payload["likes"] = json!(3);

    let response = post_project(&app, payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let projects = get_array(&app, "/projects").await;
    assert!(projects[0].get("likes").is_none());
}

#[tokio::test]
async fn strict_create_without_type_fails_and_persists_nothing() {
    let app = strict_app();
    let mut payload = listing("A", "type1");
    payload.as_object_mut().unwrap().remove("type");

    let response = post_project(&app, payload).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Failed to save project data" }));

    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn strict_create_rejects_each_missing_required_field() {
    for field in ["title", "description", "author", "imgSrc", "type"] {
        let app = strict_app();
        let mut payload = listing("A", "type1");
        payload.as_object_mut().unwrap().remove(field);

        let response = post_project(&app, payload).await;
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "missing {field} should be rejected"
        );
        assert!(get_array(&app, "/projects").await.is_empty());
    }
}

#[tokio::test]
async fn strict_create_rejects_empty_title() {
    let app = strict_app();

    let response = post_project(&app, listing("", "type1")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn loose_create_accepts_partial_payload() {
    let app = loose_app();

    let response = post_project(&app, json!({ "title": "Just a title" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let projects = get_array(&app, "/projects").await;
    assert_eq!(projects[0]["title"], "Just a title");
    assert!(projects[0].get("author").is_none());
}

#[tokio::test]
async fn create_with_uncastable_field_fails() {
    let app = loose_app();

    let response = post_project(&app, json!({ "title": { "nested": true } })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn create_with_malformed_json_is_rejected_before_store() {
    let app = loose_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/projects")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn loose_create_without_json_content_type_stores_empty_listing() {
    let app = loose_app();

    let response = post_raw(&app, None, r#"{"title":"A"}"#).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let projects = get_array(&app, "/projects").await;
    assert_eq!(projects.len(), 1);
    assert!(projects[0].get("title").is_none());
}

#[tokio::test]
async fn strict_create_without_json_content_type_fails_validation() {
    let app = strict_app();

    let response = post_raw(&app, Some("text/plain"), r#"{"title":"A"}"#).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Failed to save project data" }));
    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn create_with_scalar_json_body_is_bad_request() {
    let app = loose_app();

    for payload in [r#""just a string""#, "42", "true", "null"] {
        let response = post_raw(&app, Some("application/json"), payload).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{payload} should be rejected"
        );
    }
    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn create_with_array_body_is_stored_as_empty_listing() {
    let app = loose_app();

    let response = post_raw(&app, Some("application/json"), r#"["title"]"#).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(get_array(&app, "/projects").await.len(), 1);
}

// =============================================================================
// GET /projects - List Projects
// =============================================================================

#[tokio::test]
async fn list_projects_initially_empty() {
    let app = strict_app();
    assert!(get_array(&app, "/projects").await.is_empty());
}

#[tokio::test]
async fn list_returns_later_record_first() {
    let app = strict_app();

    post_project(&app, listing("R1", "type1")).await;
    post_project(&app, listing("R2", "type1")).await;

    let projects = get_array(&app, "/projects").await;
    let titles: Vec<&str> = projects
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["R2", "R1"]);
}

#[tokio::test]
async fn list_is_in_non_increasing_created_at_order() {
    let app = loose_app();

    post_project(&app, json!({ "title": "old", "createdAt": "2020-01-01T00:00:00Z" })).await;
    post_project(&app, json!({ "title": "now" })).await;
    post_project(&app, json!({ "title": "older", "createdAt": "2019-06-01T00:00:00Z" })).await;

    let projects = get_array(&app, "/projects").await;
    let titles: Vec<&str> = projects
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["now", "old", "older"]);
    assert!(
        projects
            .windows(2)
            .all(|w| created_at(&w[0]) >= created_at(&w[1]))
    );
}

#[tokio::test]
async fn created_at_is_rendered_with_milliseconds() {
    let app = loose_app();
    post_project(&app, json!({ "title": "dated", "createdAt": "2024-03-01" })).await;

    let projects = get_array(&app, "/projects").await;

    assert_eq!(projects[0]["createdAt"], "2024-03-01T00:00:00.000Z");
}

#[tokio::test]
async fn repeated_listing_is_identical() {
    let app = strict_app();
    post_project(&app, listing("A", "type1")).await;
    post_project(&app, listing("B", "type2")).await;

    let first = get_array(&app, "/projects").await;
    let second = get_array(&app, "/projects").await;

    assert_eq!(first, second);
}

// =============================================================================
// GET /projects/{type} - List Projects By Type
// =============================================================================

#[tokio::test]
async fn type4_listing_includes_committee_details() {
    let app = strict_app();

    let response = post_project(
        &app,
        json!({
            "title": "A",
            "description": "d",
            "author": "x",
            "imgSrc": "i",
            "type": "type4",
            "committeeDetails": "C"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let projects = get_array(&app, "/projects/type4").await;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["title"], "A");
    assert_eq!(projects[0]["committeeDetails"], "C");
}

#[tokio::test]
async fn list_by_type_returns_exact_subset_newest_first() {
    let app = strict_app();

    post_project(&app, listing("a", "type1")).await;
    post_project(&app, listing("b", "type4")).await;
    post_project(&app, listing("c", "type44")).await;
    post_project(&app, listing("d", "type4")).await;

    let projects = get_array(&app, "/projects/type4").await;
    let titles: Vec<&str> = projects
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["d", "b"]);
    assert!(projects.iter().all(|p| p["type"] == "type4"));
}

#[tokio::test]
async fn list_by_type_without_matches_is_empty_ok() {
    let app = strict_app();
    post_project(&app, listing("a", "type1")).await;

    let projects = get_array(&app, "/projects/type9").await;
    assert!(projects.is_empty());
}

#[tokio::test]
async fn committee_details_accepted_for_any_type() {
    let app = strict_app();
    let mut payload = listing("a", "type1");
    payload["committeeDetails"] = json!("not type4");

    assert_eq!(
        post_project(&app, payload).await.status(),
        StatusCode::CREATED
    );
    let projects = get_array(&app, "/projects/type1").await;
    assert_eq!(projects[0]["committeeDetails"], "not type4");
}

#[tokio::test]
async fn type_route_absent_when_filter_disabled() {
    let app = loose_app();

    let response = get(&app, "/projects/type4").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Store failures
// =============================================================================

#[tokio::test]
async fn store_failure_on_create_is_generic_500() {
    let app = broken_store_app().await;

    let response = post_project(&app, listing("A", "type1")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Failed to save project data" }));
}

#[tokio::test]
async fn store_failure_on_list_is_generic_500() {
    let app = broken_store_app().await;

    let response = get(&app, "/projects").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "Failed to fetch projects" }));
}

#[tokio::test]
async fn store_failure_on_list_by_type_uses_message_key() {
    let app = broken_store_app().await;

    let response = get(&app, "/projects/type4").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "message": "Failed to fetch projects by type" }));
}

// =============================================================================
// Middleware
// =============================================================================

#[tokio::test]
async fn cors_headers_sent_when_enabled() {
    let app = loose_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/projects")
                .header("origin", "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn cors_headers_absent_when_disabled() {
    let app = strict_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/projects")
                .header("origin", "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get("access-control-allow-origin")
            .is_none()
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = loose_app();
    let payload = json!({ "title": "x".repeat(routes::BODY_LIMIT_BYTES + 1) });

    let response = post_project(&app, payload).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(get_array(&app, "/projects").await.is_empty());
}
