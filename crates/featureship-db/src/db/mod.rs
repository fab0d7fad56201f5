//! Database repositories for data access layer
//!
//! This module contains all repository implementations for database operations.
//! Repositories are organized into control/ (companies, organizations, users,
//! audit logs) and feedback/ (posts, comments, tags, types). Each repository is
//! responsible for a specific domain entity and provides CRUD operations and
//! specialized queries.
//
// Control repositories (companies, organizations, users, audit logs)
pub mod control;
//
// Feedback repositories (posts, comments, tags, types)
pub mod feedback;
//
// Transaction utilities
pub mod transaction;

pub use control::{
    AuditLogRepository, CompanyRepository, OrganizationRepository, UserRepository,
};
pub use feedback::{CommentRepository, PostRepository, TagRepository, TypeRepository};
pub use transaction::TransactionGuard;
