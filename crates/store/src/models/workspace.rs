//! Workspace entity model and DTOs.

use atrium_core::patch::Patch;
use atrium_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A workspace document from the `workspaces` collection.
///
/// `invite_code` is the only secret-bearing field in the data model;
/// it is mutable only through the reset-invite-code operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: DocId,
    pub name: String,
    /// The user who created the workspace (and became its first admin).
    pub owner_user_id: DocId,
    /// Reference into the external blob store, if an image was set.
    pub image_ref: Option<String>,
    pub invite_code: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workspace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateWorkspace {
    #[validate(length(min = 1, max = 256, message = "name must be 1-256 characters"))]
    pub name: String,
    pub image_ref: Option<String>,
}

/// DTO for updating a workspace. Absent fields are left untouched;
/// `image_ref: null` clears the image.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkspace {
    pub name: Option<String>,
    #[serde(default)]
    pub image_ref: Patch<String>,
}

/// DTO for joining a workspace with an invite code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinWorkspace {
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}
