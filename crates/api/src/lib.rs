//! HTTP layer for the atrium project-management backend.

pub mod auth;
pub mod authority;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
