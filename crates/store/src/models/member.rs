//! Member entity model and DTOs.

use atrium_core::roles::MemberRole;
use atrium_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};

/// A member document from the `members` collection.
///
/// Join entity binding a user to a workspace with a role; unique per
/// (workspace_id, user_id). Task assignees reference the member id,
/// not the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: DocId,
    pub workspace_id: DocId,
    pub user_id: DocId,
    pub role: MemberRole,
    pub created_at: Timestamp,
}

/// DTO for changing a member's role.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRole {
    pub role: MemberRole,
}

/// A member enriched with the underlying user's display name and
/// email for list endpoints and task assignees.
#[derive(Debug, Clone, Serialize)]
pub struct MemberWithUser {
    #[serde(flatten)]
    pub member: Member,
    pub name: String,
    pub email: String,
}
