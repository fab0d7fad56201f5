//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod audit;
mod comment;
mod company;
mod feedback_type;
mod organization;
mod post;
mod tag;
mod user;

// Re-export all models for convenient imports
pub use audit::*;
pub use comment::*;
pub use company::*;
pub use feedback_type::*;
pub use organization::*;
pub use post::*;
pub use tag::*;
pub use user::*;
