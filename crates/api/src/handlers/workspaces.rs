//! Handlers for the `/workspaces` resource, including the invite/join
//! protocol.

use atrium_core::error::CoreError;
use atrium_core::invite::{generate_invite_code, INVITE_CODE_LENGTH};
use atrium_core::roles::MemberRole;
use atrium_core::types::DocId;
use atrium_store::models::member::Member;
use atrium_store::models::workspace::{
    CreateWorkspace, JoinWorkspace, UpdateWorkspace, Workspace,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::authority::{resolve_admin, resolve_membership};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

/// GET /api/v1/workspaces
///
/// Lists the workspaces the caller is a member of, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Workspace>>>> {
    let memberships = state.store.list_memberships(auth.user_id).await?;
    let workspace_ids: Vec<DocId> = memberships.iter().map(|m| m.workspace_id).collect();
    let workspaces = state.store.list_workspaces_by_ids(&workspace_ids).await?;
    Ok(Json(DataResponse { data: workspaces }))
}

/// POST /api/v1/workspaces
///
/// Creates a workspace and makes the caller its first ADMIN member.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<(StatusCode, Json<DataResponse<Workspace>>)> {
    input.validate()?;

    let now = Utc::now();
    let workspace = state
        .store
        .create_workspace(Workspace {
            id: Uuid::new_v4(),
            name: input.name,
            owner_user_id: auth.user_id,
            image_ref: input.image_ref,
            invite_code: generate_invite_code(INVITE_CODE_LENGTH),
            created_at: now,
            updated_at: now,
        })
        .await?;

    state
        .store
        .create_member(Member {
            id: Uuid::new_v4(),
            workspace_id: workspace.id,
            user_id: auth.user_id,
            role: MemberRole::Admin,
            created_at: now,
        })
        .await?;

    tracing::info!(workspace_id = %workspace.id, user_id = %auth.user_id, "workspace created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: workspace })))
}

/// GET /api/v1/workspaces/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    resolve_membership(state.store.as_ref(), &auth, id).await?;
    let workspace = state
        .store
        .get_workspace(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    Ok(Json(DataResponse { data: workspace }))
}

/// PATCH /api/v1/workspaces/{id}
///
/// Admin only. `image_ref: null` clears the image.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateWorkspace>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    resolve_admin(state.store.as_ref(), &auth, id).await?;
    let workspace = state
        .store
        .update_workspace(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    Ok(Json(DataResponse { data: workspace }))
}

/// DELETE /api/v1/workspaces/{id}
///
/// Admin only. Removes the workspace together with its members,
/// projects, and tasks.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    resolve_admin(state.store.as_ref(), &auth, id).await?;
    let deleted = state.store.delete_workspace(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }));
    }
    tracing::info!(workspace_id = %id, "workspace deleted");
    Ok(Json(DataResponse {
        data: Deleted { id },
    }))
}

/// POST /api/v1/workspaces/{id}/reset-invite-code
///
/// Admin only. Replaces the invite code in a single document write;
/// the previous code stops working immediately.
pub async fn reset_invite_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    resolve_admin(state.store.as_ref(), &auth, id).await?;
    let workspace = state
        .store
        .set_invite_code(id, generate_invite_code(INVITE_CODE_LENGTH))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    tracing::info!(workspace_id = %id, "invite code rotated");
    Ok(Json(DataResponse { data: workspace }))
}

/// POST /api/v1/workspaces/{id}/join
///
/// Admits the caller as a MEMBER when the supplied code matches the
/// workspace's current invite code (exact string comparison). Not
/// idempotent: a second call for the same (user, workspace) fails.
pub async fn join(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
    Json(input): Json<JoinWorkspace>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    input.validate()?;

    if state
        .store
        .find_member(id, auth.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Already a member of this workspace".into(),
        ));
    }

    let workspace = state
        .store
        .get_workspace(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;

    if workspace.invite_code != input.code {
        return Err(AppError::BadRequest("Invalid invite code".into()));
    }

    state
        .store
        .create_member(Member {
            id: Uuid::new_v4(),
            workspace_id: workspace.id,
            user_id: auth.user_id,
            role: MemberRole::Member,
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!(workspace_id = %id, user_id = %auth.user_id, "user joined workspace");
    Ok(Json(DataResponse { data: workspace }))
}
