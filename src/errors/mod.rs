//! Centralized error handling for the catalog service
//!
//! # Error Categories
//!
//! - **Source Errors**: remote playlist connectivity, status codes, timeouts
//! - **Configuration Errors**: invalid or unreadable settings
//!
//! Malformed playlist content is not an error: the parser drops or defaults
//! whatever it cannot use.

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
