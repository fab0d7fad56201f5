//! Feature Ship Core Library
//!
//! This crate provides core domain models, error types, configuration, and
//! timestamp normalization shared across all Feature Ship components.

pub mod config;
pub mod error;
pub mod models;
pub mod timestamp;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use timestamp::parse_instant;
