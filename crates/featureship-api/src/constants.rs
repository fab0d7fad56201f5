//! API constants
//!
//! All routes are versioned under a single prefix.

/// API base path prefix, including version.
pub const API_PREFIX: &str = "/api/v0";
