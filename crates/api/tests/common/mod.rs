//! Shared helpers for the HTTP integration tests.
//!
//! Tests seed documents directly into a [`MemoryStore`], keep a handle
//! to it, and drive the full application router (same middleware stack
//! as production) via `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use atrium_api::auth::jwt::{generate_access_token, JwtConfig};
use atrium_api::config::ServerConfig;
use atrium_api::router::build_app_router;
use atrium_api::state::AppState;
use atrium_core::roles::MemberRole;
use atrium_core::status::TaskStatus;
use atrium_core::types::{DocId, Timestamp};
use atrium_store::models::member::Member;
use atrium_store::models::project::Project;
use atrium_store::models::task::Task;
use atrium_store::models::user::User;
use atrium_store::models::workspace::Workspace;
use atrium_store::{DocumentStore, MemoryStore};
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router around the given store.
///
/// The caller keeps its own `Arc` to the store so tests can seed and
/// inspect documents directly while driving the HTTP surface.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a bearer token for the given user with the test JWT config.
pub fn token_for(user_id: DocId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation failed")
}

/// Send a request with an optional bearer token and JSON body.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Shorthand for an authenticated GET.
pub async fn get(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::GET, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("invalid JSON body: {e}"))
}

/// Assert status and return the parsed body.
pub async fn expect_status(
    response: Response<Body>,
    expected: StatusCode,
) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}

// ---------------------------------------------------------------------------
// Store seeding helpers
// ---------------------------------------------------------------------------

pub async fn seed_user(store: &MemoryStore, name: &str, email: &str) -> User {
    store
        .put_user(User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

/// Create a workspace owned by `owner`, with the owner seeded as its
/// first ADMIN member. Returns the workspace and the owner's member
/// record.
pub async fn seed_workspace(
    store: &MemoryStore,
    owner: &User,
    invite_code: &str,
) -> (Workspace, Member) {
    let now = Utc::now();
    let workspace = store
        .create_workspace(Workspace {
            id: Uuid::new_v4(),
            name: "Test Workspace".to_string(),
            owner_user_id: owner.id,
            image_ref: None,
            invite_code: invite_code.to_string(),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    let member = seed_member(store, workspace.id, owner.id, MemberRole::Admin).await;
    (workspace, member)
}

pub async fn seed_member(
    store: &MemoryStore,
    workspace_id: DocId,
    user_id: DocId,
    role: MemberRole,
) -> Member {
    store
        .create_member(Member {
            id: Uuid::new_v4(),
            workspace_id,
            user_id,
            role,
            created_at: Utc::now(),
        })
        .await
        .unwrap()
}

pub async fn seed_project(store: &MemoryStore, workspace_id: DocId, name: &str) -> Project {
    let now = Utc::now();
    store
        .create_project(Project {
            id: Uuid::new_v4(),
            workspace_id,
            name: name.to_string(),
            image_ref: None,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap()
}

/// Seed a task with explicit status/position and a controllable
/// created_at (analytics tests pin tasks into specific month windows).
#[allow(clippy::too_many_arguments)]
pub async fn seed_task(
    store: &MemoryStore,
    workspace_id: DocId,
    project_id: DocId,
    assignee_id: DocId,
    name: &str,
    status: TaskStatus,
    position: i64,
    due_date: Timestamp,
    created_at: Timestamp,
) -> Task {
    store
        .create_task(Task {
            id: Uuid::new_v4(),
            workspace_id,
            project_id,
            assignee_id,
            name: name.to_string(),
            description: None,
            status,
            due_date,
            position,
            created_at,
            updated_at: created_at,
        })
        .await
        .unwrap()
}
