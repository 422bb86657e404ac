//! Route definitions for the `/workspaces` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{analytics, workspaces};
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/reset-invite-code    -> reset_invite_code
/// POST   /{id}/join                 -> join
/// GET    /{id}/analytics            -> analytics::workspace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspaces::list).post(workspaces::create))
        .route(
            "/{id}",
            get(workspaces::get_by_id)
                .patch(workspaces::update)
                .delete(workspaces::delete),
        )
        .route(
            "/{id}/reset-invite-code",
            post(workspaces::reset_invite_code),
        )
        .route("/{id}/join", post(workspaces::join))
        .route("/{id}/analytics", get(analytics::workspace))
}
