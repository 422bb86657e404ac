//! Route definitions for the `/members` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/members`.
///
/// ```text
/// GET    /        -> list (?workspace_id=...)
/// PATCH  /{id}    -> update_role
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list))
        .route(
            "/{id}",
            axum::routing::patch(members::update_role).delete(members::delete),
        )
}
