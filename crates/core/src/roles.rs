//! Workspace member roles.

use serde::{Deserialize, Serialize};

/// Role a member holds within a single workspace.
///
/// Roles are per-workspace: the same user may be an admin of one
/// workspace and a plain member of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn is_admin(self) -> bool {
        self == MemberRole::Admin
    }
}
