//! Project entity model and DTOs.

use atrium_core::patch::Patch;
use atrium_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A project document from the `projects` collection. Belongs to
/// exactly one workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: DocId,
    pub workspace_id: DocId,
    pub name: String,
    pub image_ref: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub workspace_id: DocId,
    #[validate(length(min = 1, max = 256, message = "name must be 1-256 characters"))]
    pub name: String,
    pub image_ref: Option<String>,
}

/// DTO for updating a project. Absent fields are left untouched;
/// `image_ref: null` clears the image.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    #[serde(default)]
    pub image_ref: Patch<String>,
}
