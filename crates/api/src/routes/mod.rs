pub mod health;
pub mod members;
pub mod projects;
pub mod tasks;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workspaces                              list, create
/// /workspaces/{id}                         get, update, delete
/// /workspaces/{id}/reset-invite-code       rotate invite code (POST)
/// /workspaces/{id}/join                    join via invite code (POST)
/// /workspaces/{id}/analytics               month-over-month metrics
///
/// /members?workspace_id=...                list with user enrichment
/// /members/{id}                            change role (PATCH), remove (DELETE)
///
/// /projects                                list, create
/// /projects/{id}                           get, update, delete
/// /projects/{id}/analytics                 month-over-month metrics
///
/// /tasks                                   filtered list, create
/// /tasks/bulk-update                       batch reorder (POST)
/// /tasks/{id}                              get, update, delete
/// ```
///
/// Every route requires a bearer token; authorization beyond that is
/// resolved per request against the target workspace's membership.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workspaces", workspaces::router())
        .nest("/members", members::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
}
