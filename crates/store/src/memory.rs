//! In-memory document store.
//!
//! One `RwLock`ed map per collection gives the per-document atomic
//! read-modify-write the contract asks for (each update happens under
//! a single write-lock acquisition). Used by the server binary and by
//! every test; a hosted document database would slot in behind the
//! same trait.

use std::collections::HashMap;

use async_trait::async_trait;
use atrium_core::roles::MemberRole;
use atrium_core::status::TaskStatus;
use atrium_core::types::DocId;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::models::member::Member;
use crate::models::project::{Project, UpdateProject};
use crate::models::task::{Task, TaskCountFilter, TaskFilter, UpdateTask};
use crate::models::user::User;
use crate::models::workspace::{UpdateWorkspace, Workspace};
use crate::store::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<DocId, User>>,
    workspaces: RwLock<HashMap<DocId, Workspace>>,
    members: RwLock<HashMap<DocId, Member>>,
    projects: RwLock<HashMap<DocId, Project>>,
    tasks: RwLock<HashMap<DocId, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    // -- users ---------------------------------------------------------

    async fn put_user(&self, user: User) -> StoreResult<User> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: DocId) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list_users_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    // -- workspaces ----------------------------------------------------

    async fn create_workspace(&self, workspace: Workspace) -> StoreResult<Workspace> {
        self.workspaces
            .write()
            .await
            .insert(workspace.id, workspace.clone());
        Ok(workspace)
    }

    async fn get_workspace(&self, id: DocId) -> StoreResult<Option<Workspace>> {
        Ok(self.workspaces.read().await.get(&id).cloned())
    }

    async fn list_workspaces_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Workspace>> {
        let workspaces = self.workspaces.read().await;
        let mut found: Vec<Workspace> = ids
            .iter()
            .filter_map(|id| workspaces.get(id).cloned())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn update_workspace(
        &self,
        id: DocId,
        input: &UpdateWorkspace,
    ) -> StoreResult<Option<Workspace>> {
        let mut workspaces = self.workspaces.write().await;
        let Some(workspace) = workspaces.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            workspace.name = name.clone();
        }
        input.image_ref.clone().apply(&mut workspace.image_ref);
        workspace.updated_at = Utc::now();
        Ok(Some(workspace.clone()))
    }

    async fn set_invite_code(&self, id: DocId, code: String) -> StoreResult<Option<Workspace>> {
        let mut workspaces = self.workspaces.write().await;
        let Some(workspace) = workspaces.get_mut(&id) else {
            return Ok(None);
        };
        workspace.invite_code = code;
        workspace.updated_at = Utc::now();
        Ok(Some(workspace.clone()))
    }

    async fn delete_workspace(&self, id: DocId) -> StoreResult<bool> {
        if self.workspaces.write().await.remove(&id).is_none() {
            return Ok(false);
        }
        self.members
            .write()
            .await
            .retain(|_, m| m.workspace_id != id);
        self.projects
            .write()
            .await
            .retain(|_, p| p.workspace_id != id);
        self.tasks.write().await.retain(|_, t| t.workspace_id != id);
        Ok(true)
    }

    // -- members -------------------------------------------------------

    async fn create_member(&self, member: Member) -> StoreResult<Member> {
        self.members.write().await.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_member(&self, id: DocId) -> StoreResult<Option<Member>> {
        Ok(self.members.read().await.get(&id).cloned())
    }

    async fn find_member(
        &self,
        workspace_id: DocId,
        user_id: DocId,
    ) -> StoreResult<Option<Member>> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
            .cloned())
    }

    async fn list_members(&self, workspace_id: DocId) -> StoreResult<Vec<Member>> {
        let members = self.members.read().await;
        let mut found: Vec<Member> = members
            .values()
            .filter(|m| m.workspace_id == workspace_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn list_members_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Member>> {
        let members = self.members.read().await;
        Ok(ids.iter().filter_map(|id| members.get(id).cloned()).collect())
    }

    async fn list_memberships(&self, user_id: DocId) -> StoreResult<Vec<Member>> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn count_admins(&self, workspace_id: DocId) -> StoreResult<i64> {
        Ok(self
            .members
            .read()
            .await
            .values()
            .filter(|m| m.workspace_id == workspace_id && m.role.is_admin())
            .count() as i64)
    }

    async fn update_member_role(
        &self,
        id: DocId,
        role: MemberRole,
    ) -> StoreResult<Option<Member>> {
        let mut members = self.members.write().await;
        let Some(member) = members.get_mut(&id) else {
            return Ok(None);
        };
        member.role = role;
        Ok(Some(member.clone()))
    }

    async fn delete_member(&self, id: DocId) -> StoreResult<bool> {
        Ok(self.members.write().await.remove(&id).is_some())
    }

    // -- projects ------------------------------------------------------

    async fn create_project(&self, project: Project) -> StoreResult<Project> {
        self.projects
            .write()
            .await
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn get_project(&self, id: DocId) -> StoreResult<Option<Project>> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list_projects(&self, workspace_id: DocId) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        let mut found: Vec<Project> = projects
            .values()
            .filter(|p| p.workspace_id == workspace_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn list_projects_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Project>> {
        let projects = self.projects.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| projects.get(id).cloned())
            .collect())
    }

    async fn update_project(
        &self,
        id: DocId,
        input: &UpdateProject,
    ) -> StoreResult<Option<Project>> {
        let mut projects = self.projects.write().await;
        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            project.name = name.clone();
        }
        input.image_ref.clone().apply(&mut project.image_ref);
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: DocId) -> StoreResult<bool> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }

    // -- tasks ---------------------------------------------------------

    async fn create_task(&self, task: Task) -> StoreResult<Task> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: DocId) -> StoreResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut found: Vec<Task> = tasks
            .values()
            .filter(|t| t.workspace_id == filter.workspace_id)
            .filter(|t| filter.project_id.is_none_or(|p| t.project_id == p))
            .filter(|t| filter.assignee_id.is_none_or(|a| t.assignee_id == a))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.due_date.is_none_or(|d| t.due_date == d))
            .filter(|t| {
                needle
                    .as_ref()
                    .is_none_or(|n| t.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn list_tasks_by_ids(&self, ids: &[DocId]) -> StoreResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(ids.iter().filter_map(|id| tasks.get(id).cloned()).collect())
    }

    async fn highest_position(
        &self,
        workspace_id: DocId,
        status: TaskStatus,
    ) -> StoreResult<Option<i64>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.workspace_id == workspace_id && t.status == status)
            .map(|t| t.position)
            .max())
    }

    async fn update_task(&self, id: DocId, input: &UpdateTask) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            task.name = name.clone();
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        if let Some(project_id) = input.project_id {
            task.project_id = project_id;
        }
        if let Some(assignee_id) = input.assignee_id {
            task.assignee_id = assignee_id;
        }
        if let Some(due_date) = input.due_date {
            task.due_date = due_date;
        }
        input.description.clone().apply(&mut task.description);
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn set_task_order(
        &self,
        id: DocId,
        status: TaskStatus,
        position: i64,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.status = status;
        task.position = position;
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: DocId) -> StoreResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn count_tasks(&self, filter: &TaskCountFilter) -> StoreResult<i64> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.workspace_id == filter.workspace_id)
            .filter(|t| filter.project_id.is_none_or(|p| t.project_id == p))
            .filter(|t| filter.assignee_id.is_none_or(|a| t.assignee_id == a))
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.status_not.is_none_or(|s| t.status != s))
            .filter(|t| filter.due_before.is_none_or(|d| t.due_date < d))
            .filter(|t| {
                filter
                    .created_on_or_after
                    .is_none_or(|c| t.created_at >= c)
            })
            .filter(|t| filter.created_before.is_none_or(|c| t.created_at < c))
            .count() as i64)
    }
}
