//! User read model.

use atrium_core::types::{DocId, Timestamp};
use serde::{Deserialize, Serialize};

/// A user document from the `users` collection.
///
/// Users are owned by the external identity provider; this collection
/// is a read model kept only so member lists and task assignees can be
/// enriched with a display name and email. It is never written through
/// the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: DocId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}
