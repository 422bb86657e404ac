//! Document-store abstraction and entity models.
//!
//! The persistent store is an external collaborator: the backend only
//! needs list/get/create/update/delete plus compound filter queries
//! over five collections (`users`, `workspaces`, `members`,
//! `projects`, `tasks`). [`DocumentStore`] captures that contract;
//! [`MemoryStore`] is the in-process implementation used by the
//! server binary and the test suites.

pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::DocumentStore;
