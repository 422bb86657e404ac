//! Handlers for the `/projects` resource.

use atrium_core::error::CoreError;
use atrium_core::types::DocId;
use atrium_store::models::project::{CreateProject, Project, UpdateProject};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::authority::resolve_membership;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

/// Query parameters for the project list endpoint.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub workspace_id: DocId,
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    input.validate()?;
    resolve_membership(state.store.as_ref(), &auth, input.workspace_id).await?;

    let now = Utc::now();
    let project = state
        .store
        .create_project(Project {
            id: Uuid::new_v4(),
            workspace_id: input.workspace_id,
            name: input.name,
            image_ref: input.image_ref,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects?workspace_id=...
///
/// Projects of a workspace, most recently updated first.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProjectListQuery>,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    resolve_membership(state.store.as_ref(), &auth, query.workspace_id).await?;
    let projects = state.store.list_projects(query.workspace_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    resolve_membership(state.store.as_ref(), &auth, project.workspace_id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PATCH /api/v1/projects/{id}
///
/// `image_ref: null` clears the image.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    resolve_membership(state.store.as_ref(), &auth, project.workspace_id).await?;

    let updated = state
        .store
        .update_project(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/projects/{id}
///
/// Tasks keep their project reference; the task denormalizer treats it
/// as dangling from then on.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    resolve_membership(state.store.as_ref(), &auth, project.workspace_id).await?;

    state.store.delete_project(id).await?;
    Ok(Json(DataResponse {
        data: Deleted { id },
    }))
}
