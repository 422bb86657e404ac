pub mod member;
pub mod project;
pub mod task;
pub mod user;
pub mod workspace;
