//! Error type definitions for the catalog service
//!
//! Fetch failures are modelled by [`SourceError`] and recovered inside the
//! catalog cache. [`AppError`] is the top-level type used by startup and
//! configuration code.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Errors raised while retrieving the remote playlist
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The request did not complete within the configured timeout
    #[error("Connection timeout: {url}")]
    Timeout { url: String },

    /// The remote host answered with a non-success status
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure (DNS, TLS, refused, reset)
    #[error("Network error: {url} - {message}")]
    Network { url: String, message: String },

    /// The body could not be read or decoded as text
    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a timeout error
    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Create an HTTP status error
    pub fn http<M: Into<String>>(status: u16, message: M) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode<M: Into<String>>(message: M) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
