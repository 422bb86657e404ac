//! Workspace and project analytics: month-over-month task metrics.

use atrium_core::analytics::{month_window, previous_month_window, MetricPair, MonthWindow};
use atrium_core::error::CoreError;
use atrium_core::status::TaskStatus;
use atrium_core::types::{DocId, Timestamp};
use atrium_store::models::task::TaskCountFilter;
use atrium_store::DocumentStore;
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::authority::resolve_membership;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Month-over-month task metrics for one workspace or project.
///
/// Each pair carries the current calendar month's count and the delta
/// against the previous calendar month.
#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub task_count: MetricPair,
    pub assigned_task_count: MetricPair,
    pub completed_task_count: MetricPair,
    pub incomplete_task_count: MetricPair,
    pub overdue_task_count: MetricPair,
}

/// GET /api/v1/workspaces/{id}/analytics
pub async fn workspace(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<AnalyticsSummary>>> {
    let member = resolve_membership(state.store.as_ref(), &auth, id).await?;
    let summary = build_summary(state.store.as_ref(), id, None, member.id).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/projects/{id}/analytics
pub async fn project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DocId>,
) -> AppResult<Json<DataResponse<AnalyticsSummary>>> {
    let project = state
        .store
        .get_project(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    let member = resolve_membership(state.store.as_ref(), &auth, project.workspace_id).await?;
    let summary = build_summary(
        state.store.as_ref(),
        project.workspace_id,
        Some(id),
        member.id,
    )
    .await?;
    Ok(Json(DataResponse { data: summary }))
}

/// Counts each metric over the current and previous calendar month and
/// folds the two into [`MetricPair`]s. Ten count queries total; a task
/// created outside both windows contributes to neither.
async fn build_summary(
    store: &dyn DocumentStore,
    workspace_id: DocId,
    project_id: Option<DocId>,
    member_id: DocId,
) -> Result<AnalyticsSummary, AppError> {
    let now = Utc::now();
    let this_month = month_window(now);
    let last_month = previous_month_window(now);

    let base = |window: &MonthWindow| TaskCountFilter {
        project_id,
        created_on_or_after: Some(window.start),
        created_before: Some(window.end),
        ..TaskCountFilter::workspace(workspace_id)
    };
    let assigned = |window: &MonthWindow| TaskCountFilter {
        assignee_id: Some(member_id),
        ..base(window)
    };
    let completed = |window: &MonthWindow| TaskCountFilter {
        status: Some(TaskStatus::Done),
        ..base(window)
    };
    let incomplete = |window: &MonthWindow| TaskCountFilter {
        status_not: Some(TaskStatus::Done),
        ..base(window)
    };
    let overdue = |window: &MonthWindow, cutoff: Timestamp| TaskCountFilter {
        status_not: Some(TaskStatus::Done),
        due_before: Some(cutoff),
        ..base(window)
    };

    Ok(AnalyticsSummary {
        task_count: MetricPair::new(
            store.count_tasks(&base(&this_month)).await?,
            store.count_tasks(&base(&last_month)).await?,
        ),
        assigned_task_count: MetricPair::new(
            store.count_tasks(&assigned(&this_month)).await?,
            store.count_tasks(&assigned(&last_month)).await?,
        ),
        completed_task_count: MetricPair::new(
            store.count_tasks(&completed(&this_month)).await?,
            store.count_tasks(&completed(&last_month)).await?,
        ),
        incomplete_task_count: MetricPair::new(
            store.count_tasks(&incomplete(&this_month)).await?,
            store.count_tasks(&incomplete(&last_month)).await?,
        ),
        overdue_task_count: MetricPair::new(
            store.count_tasks(&overdue(&this_month, now)).await?,
            store.count_tasks(&overdue(&last_month, now)).await?,
        ),
    })
}
