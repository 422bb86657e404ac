//! Handlers for the `/tasks` resource: CRUD, the kanban ordering
//! engine, and the task query denormalizer.

use std::collections::{HashMap, HashSet};

use atrium_core::error::CoreError;
use atrium_core::ordering::{next_position, validate_position};
use atrium_core::status::TaskStatus;
use atrium_core::types::{DocId, Timestamp};
use atrium_store::models::member::MemberWithUser;
use atrium_store::models::project::Project;
use atrium_store::models::task::{
    BulkTaskUpdate, CreateTask, Task, TaskFilter, TaskWithRelations, UpdateTask,
};
use atrium_store::models::user::User;
use atrium_store::DocumentStore;
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

/// Query parameters for the task list endpoint.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub workspace_id: DocId,
    pub project_id: Option<DocId>,
    pub assignee_id: Option<DocId>,
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
    pub due_date: Option<Timestamp>,
}

/// Body of a bulk reorder request.
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub tasks: Vec<BulkTaskUpdate>,
}

/// GET /api/v1/tasks?workspace_id=...
///
/// Filtered task list, newest created first, each task annotated with
/// its project and assignee.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TaskListQuery>,
) -> AppResult<Json<DataResponse<Vec<TaskWithRelations>>>> {
    resolve_membership(state.store.as_ref(), &auth, query.workspace_id).await?;

    let filter = TaskFilter {
        workspace_id: query.workspace_id,
        project_id: query.project_id,
        assignee_id: query.assignee_id,
        status: query.status,
        search: query.search,
        due_date: query.due_date,
    };
    let tasks = state.store.list_tasks(&filter).await?;
    let denormalized = denormalize(state.store.as_ref(), tasks).await?;
    Ok(Json(DataResponse { data: denormalized }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<TaskWithRelations>>> {
    let task = state
        .store
        .get_task(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    resolve_membership(state.store.as_ref(), &auth, task.workspace_id).await?;

    let mut denormalized = denormalize(state.store.as_ref(), vec![task]).await?;
    // denormalize preserves input length, so exactly one element.
    let single = denormalized
        .pop()
        .ok_or_else(|| AppError::Core(CoreError::Internal("denormalizer dropped a task".into())))?;
    Ok(Json(DataResponse { data: single }))
}

/// POST /api/v1/tasks
///
/// The position is assigned server-side: one past the current highest
/// position in the task's (workspace, status) bucket.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    input.validate()?;
    resolve_membership(state.store.as_ref(), &auth, input.workspace_id).await?;

    let highest = state
        .store
        .highest_position(input.workspace_id, input.status)
        .await?;
    let position = next_position(highest);

    let now = Utc::now();
    let task = state
        .store
        .create_task(Task {
            id: Uuid::new_v4(),
            workspace_id: input.workspace_id,
            project_id: input.project_id,
            assignee_id: input.assignee_id,
            name: input.name,
            description: input.description,
            status: input.status,
            due_date: input.due_date,
            position,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PATCH /api/v1/tasks/{id}
///
/// Partial update; `description: null` clears the description. An
/// empty payload is rejected.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = state
        .store
        .get_task(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    resolve_membership(state.store.as_ref(), &auth, task.workspace_id).await?;

    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields provided to update".into(),
        )));
    }

    let updated = state
        .store
        .update_task(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<Deleted>>> {
    let task = state
        .store
        .get_task(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    resolve_membership(state.store.as_ref(), &auth, task.workspace_id).await?;

    state.store.delete_task(id).await?;
    Ok(Json(DataResponse {
        data: Deleted { id },
    }))
}

/// POST /api/v1/tasks/bulk-update
///
/// Applies a batch of `(status, position)` updates — the drag-and-drop
/// reorder path. The whole batch is validated before any task is
/// written: positions must be in range, every id must resolve, and all
/// tasks must belong to one workspace the caller is a member of. The
/// writes themselves are sequential and not atomic across tasks; a
/// mid-batch store failure leaves earlier writes in place.
pub async fn bulk_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<BulkUpdateRequest>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    if request.tasks.is_empty() {
        return Err(AppError::BadRequest(
            "Batch must contain at least one task".into(),
        ));
    }
    for item in &request.tasks {
        validate_position(item.position)?;
    }

    let ids: Vec<DocId> = {
        let mut seen = HashSet::new();
        request
            .tasks
            .iter()
            .map(|t| t.id)
            .filter(|id| seen.insert(*id))
            .collect()
    };
    let loaded = state.store.list_tasks_by_ids(&ids).await?;
    if loaded.len() != ids.len() {
        return Err(AppError::BadRequest(
            "One or more tasks in the batch do not exist".into(),
        ));
    }

    let mut workspace_ids = loaded
        .iter()
        .map(|t| t.workspace_id)
        .collect::<HashSet<_>>()
        .into_iter();
    let workspace_id = match (workspace_ids.next(), workspace_ids.next()) {
        (Some(id), None) => id,
        _ => {
            return Err(AppError::BadRequest(
                "All tasks must belong to the same workspace".into(),
            ))
        }
    };

    resolve_membership(state.store.as_ref(), &auth, workspace_id).await?;

    let mut updated = Vec::with_capacity(request.tasks.len());
    for item in &request.tasks {
        let task = state
            .store
            .set_task_order(item.id, item.status, item.position)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Task",
                id: item.id,
            }))?;
        updated.push(task);
    }

    tracing::debug!(workspace_id = %workspace_id, count = updated.len(), "bulk reorder applied");
    Ok(Json(DataResponse { data: updated }))
}

/// Annotate tasks with their project and assignee.
///
/// Collects the distinct referenced ids, issues two bulk lookups
/// (projects, members) plus one bulk user lookup for the members
/// found, and stitches the results back in memory — O(1) list queries
/// regardless of result-set size, no per-task lookups. A dangling
/// reference yields `None` for that field instead of an error.
async fn denormalize(
    store: &dyn DocumentStore,
    tasks: Vec<Task>,
) -> Result<Vec<TaskWithRelations>, AppError> {
    let project_ids: Vec<DocId> = tasks
        .iter()
        .map(|t| t.project_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let assignee_ids: Vec<DocId> = tasks
        .iter()
        .map(|t| t.assignee_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let (projects, members) = tokio::try_join!(
        store.list_projects_by_ids(&project_ids),
        store.list_members_by_ids(&assignee_ids),
    )?;

    let user_ids: Vec<DocId> = members
        .iter()
        .map(|m| m.user_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let users = store.list_users_by_ids(&user_ids).await?;

    let projects_by_id: HashMap<DocId, Project> =
        projects.into_iter().map(|p| (p.id, p)).collect();
    let users_by_id: HashMap<DocId, User> = users.into_iter().map(|u| (u.id, u)).collect();
    let members_by_id: HashMap<DocId, _> = members.into_iter().map(|m| (m.id, m)).collect();

    Ok(tasks
        .into_iter()
        .map(|task| {
            let project = projects_by_id.get(&task.project_id).cloned();
            let assignee = members_by_id.get(&task.assignee_id).map(|member| {
                let user = users_by_id.get(&member.user_id);
                MemberWithUser {
                    name: user
                        .map(|u| u.name.clone())
                        .unwrap_or_else(|| "[User Not Found]".to_string()),
                    email: user
                        .map(|u| u.email.clone())
                        .unwrap_or_else(|| "[Email Not Found]".to_string()),
                    member: member.clone(),
                }
            });
            TaskWithRelations {
                task,
                project,
                assignee,
            }
        })
        .collect())
}
