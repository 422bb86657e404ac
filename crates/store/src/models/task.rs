//! Task entity model, DTOs, and query filters.

use atrium_core::patch::Patch;
use atrium_core::status::TaskStatus;
use atrium_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::member::MemberWithUser;
use crate::models::project::Project;

/// A task document from the `tasks` collection.
///
/// `position` orders tasks within their (workspace, status) column;
/// uniqueness is not required, only relative order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: DocId,
    pub workspace_id: DocId,
    pub project_id: DocId,
    /// Member id (not user id) of the assignee.
    pub assignee_id: DocId,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Timestamp,
    pub position: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. The position is assigned server-side.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    pub workspace_id: DocId,
    pub project_id: DocId,
    pub assignee_id: DocId,
    #[validate(length(min = 1, max = 256, message = "name must be 1-256 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Timestamp,
}

/// DTO for a partial task update. Absent fields are left untouched;
/// `description: null` clears the description.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    pub project_id: Option<DocId>,
    pub assignee_id: Option<DocId>,
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl UpdateTask {
    /// True when the payload carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.project_id.is_none()
            && self.assignee_id.is_none()
            && self.due_date.is_none()
            && self.description.is_keep()
    }
}

/// One entry of a bulk reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkTaskUpdate {
    pub id: DocId,
    pub status: TaskStatus,
    pub position: i64,
}

/// Filter set for listing tasks. Results are ordered newest created
/// first; `search` matches the task name case-insensitively.
#[derive(Debug, Clone)]
pub struct TaskFilter {
    pub workspace_id: DocId,
    pub project_id: Option<DocId>,
    pub assignee_id: Option<DocId>,
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
    pub due_date: Option<Timestamp>,
}

impl TaskFilter {
    pub fn workspace(workspace_id: DocId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assignee_id: None,
            status: None,
            search: None,
            due_date: None,
        }
    }
}

/// Filter set for analytics counts.
#[derive(Debug, Clone)]
pub struct TaskCountFilter {
    pub workspace_id: DocId,
    pub project_id: Option<DocId>,
    pub assignee_id: Option<DocId>,
    pub status: Option<TaskStatus>,
    /// Matches tasks whose status is anything but this one.
    pub status_not: Option<TaskStatus>,
    pub due_before: Option<Timestamp>,
    /// Inclusive lower bound on `created_at`.
    pub created_on_or_after: Option<Timestamp>,
    /// Exclusive upper bound on `created_at`.
    pub created_before: Option<Timestamp>,
}

impl TaskCountFilter {
    pub fn workspace(workspace_id: DocId) -> Self {
        Self {
            workspace_id,
            project_id: None,
            assignee_id: None,
            status: None,
            status_not: None,
            due_before: None,
            created_on_or_after: None,
            created_before: None,
        }
    }
}

/// A task annotated with its project and assignee for read APIs.
///
/// Either relation may be `None` when the referenced document no
/// longer exists; a dangling reference never fails the query.
#[derive(Debug, Clone, Serialize)]
pub struct TaskWithRelations {
    #[serde(flatten)]
    pub task: Task,
    pub project: Option<Project>,
    pub assignee: Option<MemberWithUser>,
}
