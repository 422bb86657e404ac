//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type
//! safety and consistent serialization.

use atrium_core::types::DocId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload confirming a deletion: the id of the removed document.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: DocId,
}
