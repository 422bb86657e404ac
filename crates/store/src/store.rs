//! The document-store contract.

use async_trait::async_trait;
use atrium_core::roles::MemberRole;
use atrium_core::status::TaskStatus;
use atrium_core::types::DocId;

use crate::error::StoreResult;
use crate::models::member::Member;
use crate::models::project::{Project, UpdateProject};
use crate::models::task::{Task, TaskCountFilter, TaskFilter, UpdateTask};
use crate::models::user::User;
use crate::models::workspace::{UpdateWorkspace, Workspace};

/// Generic CRUD and compound filter queries over the five collections.
///
/// The backend is assumed to provide per-document atomic
/// read-modify-write and nothing stronger: no cross-document
/// transactions, no version checks. Every update method applies its
/// changes as a single document write.
///
/// Lookup misses are `Ok(None)` / `Ok(false)`; [`crate::StoreError`]
/// is reserved for genuine backend failures.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // -- users ---------------------------------------------------------

    /// Insert or replace a user read-model document (identity-provider
    /// sync path; never driven by the HTTP surface).
    async fn put_user(&self, user: User) -> StoreResult<User>;

    async fn get_user(&self, id: DocId) -> StoreResult<Option<User>>;

    async fn list_users_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<User>>;

    // -- workspaces ----------------------------------------------------

    async fn create_workspace(&self, workspace: Workspace) -> StoreResult<Workspace>;

    async fn get_workspace(&self, id: DocId) -> StoreResult<Option<Workspace>>;

    /// Workspaces for the given ids, newest first.
    async fn list_workspaces_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Workspace>>;

    async fn update_workspace(
        &self,
        id: DocId,
        input: &UpdateWorkspace,
    ) -> StoreResult<Option<Workspace>>;

    /// Replace the invite code in a single document write.
    async fn set_invite_code(&self, id: DocId, code: String) -> StoreResult<Option<Workspace>>;

    /// Delete a workspace together with its members, projects, and
    /// tasks. Returns `false` if the workspace did not exist.
    async fn delete_workspace(&self, id: DocId) -> StoreResult<bool>;

    // -- members -------------------------------------------------------

    async fn create_member(&self, member: Member) -> StoreResult<Member>;

    async fn get_member(&self, id: DocId) -> StoreResult<Option<Member>>;

    /// The membership record for (workspace, user), if any.
    async fn find_member(
        &self,
        workspace_id: DocId,
        user_id: DocId,
    ) -> StoreResult<Option<Member>>;

    /// All members of a workspace, oldest first.
    async fn list_members(&self, workspace_id: DocId) -> StoreResult<Vec<Member>>;

    async fn list_members_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Member>>;

    /// All memberships held by a user, across workspaces.
    async fn list_memberships(&self, user_id: DocId) -> StoreResult<Vec<Member>>;

    /// Number of ADMIN members in a workspace.
    async fn count_admins(&self, workspace_id: DocId) -> StoreResult<i64>;

    async fn update_member_role(
        &self,
        id: DocId,
        role: MemberRole,
    ) -> StoreResult<Option<Member>>;

    async fn delete_member(&self, id: DocId) -> StoreResult<bool>;

    // -- projects ------------------------------------------------------

    async fn create_project(&self, project: Project) -> StoreResult<Project>;

    async fn get_project(&self, id: DocId) -> StoreResult<Option<Project>>;

    /// Projects of a workspace, most recently updated first.
    async fn list_projects(&self, workspace_id: DocId) -> StoreResult<Vec<Project>>;

    async fn list_projects_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Project>>;

    async fn update_project(
        &self,
        id: DocId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>>;

    async fn delete_project(&self, id: DocId) -> StoreResult<bool>;

    // -- tasks ---------------------------------------------------------

    async fn create_task(&self, task: Task) -> StoreResult<Task>;

    async fn get_task(&self, id: DocId) -> StoreResult<Option<Task>>;

    /// Filtered task query, newest created first.
    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>>;

    async fn list_tasks_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Task>>;

    /// Highest position currently used in the (workspace, status)
    /// bucket, or `None` if the bucket is empty.
    async fn highest_position(
        &self,
        workspace_id: DocId,
        status: TaskStatus,
    ) -> StoreResult<Option<i64>>;

    async fn update_task(&self, id: DocId, input: &UpdateTask) -> StoreResult<Option<Task>>;

    /// Write the (status, position) pair of one task — the bulk
    /// reorder write path. Last write wins under concurrency.
    async fn set_task_order(
        &self,
        id: DocId,
        status: TaskStatus,
        position: i64,
    ) -> StoreResult<Option<Task>>;

    async fn delete_task(&self, id: DocId) -> StoreResult<bool>;

    async fn count_tasks(&self, filter: &TaskCountFilter) -> StoreResult<i64>;
}
