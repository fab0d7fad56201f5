//! Feature Ship database layer.
//!
//! Repositories over a shared `PgPool`, organized into control/ (companies,
//! organizations, users, audit logs) and feedback/ (posts, comments, tags,
//! types).

pub mod db;

pub use db::*;
