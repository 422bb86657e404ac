//! Domain logic for the atrium project-management backend.
//!
//! This crate has zero internal deps so it can be used by both the
//! store and API layers (and any future CLI tooling). It holds the
//! error taxonomy, role and status enums, invite-code generation,
//! kanban position arithmetic, and analytics window math.

pub mod analytics;
pub mod error;
pub mod invite;
pub mod ordering;
pub mod patch;
pub mod roles;
pub mod status;
pub mod types;
