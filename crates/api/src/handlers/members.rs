//! Handlers for the `/members` resource.
//!
//! Member deletion and role changes are where the last-admin invariant
//! is enforced: no sequence of these operations may leave a workspace
//! without an ADMIN member.

use atrium_core::error::CoreError;
use atrium_core::roles::MemberRole;
use atrium_core::types::DocId;
use atrium_store::models::member::{MemberWithUser, UpdateMemberRole};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::authority::{ensure_not_last_admin, resolve_membership};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

/// Query parameters for the member list endpoint.
#[derive(Debug, Deserialize)]
pub struct MemberListQuery {
    pub workspace_id: DocId,
}

/// GET /api/v1/members?workspace_id=...
///
/// Lists the members of a workspace, each enriched with the underlying
/// user's name and email. A member whose user record is gone is still
/// listed, with placeholder strings.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<MemberListQuery>,
) -> AppResult<Json<DataResponse<Vec<MemberWithUser>>>> {
    resolve_membership(state.store.as_ref(), &auth, query.workspace_id).await?;

    let members = state.store.list_members(query.workspace_id).await?;
    let user_ids: Vec<DocId> = members.iter().map(|m| m.user_id).collect();
    let users = state.store.list_users_by_ids(&user_ids).await?;

    let enriched = members
        .into_iter()
        .map(|member| {
            let user = users.iter().find(|u| u.id == member.user_id);
            MemberWithUser {
                name: user
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| "[User Not Found]".to_string()),
                email: user
                    .map(|u| u.email.clone())
                    .unwrap_or_else(|| "[Email Not Found]".to_string()),
                member,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: enriched }))
}

/// PATCH /api/v1/members/{id}
///
/// Changes a member's role. Admin only; demoting the last admin is
/// rejected. Setting the role a member already holds succeeds as a
/// no-op.
pub async fn update_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateMemberRole>,
) -> AppResult<Json<DataResponse<atrium_store::models::member::Member>>> {
    let target = state
        .store
        .get_member(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;

    let acting = resolve_membership(state.store.as_ref(), &auth, target.workspace_id).await?;
    if !acting.role.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only workspace admins can change member roles".into(),
        )));
    }

    // Same role: successful no-op, and explicitly not a demotion.
    if target.role == input.role {
        return Ok(Json(DataResponse { data: target }));
    }

    if target.role.is_admin() && input.role == MemberRole::Member {
        ensure_not_last_admin(state.store.as_ref(), &target).await?;
    }

    let updated = state
        .store
        .update_member_role(id, input.role)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;

    tracing::info!(member_id = %id, role = ?input.role, "member role changed");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/members/{id}
///
/// A member may remove themself; removing anyone else requires ADMIN.
/// Either way, removing the last admin is rejected.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let target = state
        .store
        .get_member(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Member",
            id,
        }))?;

    let acting = resolve_membership(state.store.as_ref(), &auth, target.workspace_id).await?;
    if acting.id != target.id && !acting.role.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only workspace admins can remove other members".into(),
        )));
    }

    ensure_not_last_admin(state.store.as_ref(), &target).await?;

    state.store.delete_member(id).await?;
    tracing::info!(member_id = %id, workspace_id = %target.workspace_id, "member removed");
    Ok(Json(DataResponse {
        data: Deleted { id },
    }))
}
