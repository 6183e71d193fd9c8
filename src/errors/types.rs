//! Error type definitions for the playlist merger
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for automatic error trait implementations and proper
//! error chaining.

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Source handling errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Local filesystem errors (override file, output file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while fetching a remote playlist source
///
/// The original pipeline collapsed every failure into an empty document;
/// keeping transport failures and HTTP error statuses distinct lets the
/// failure policy and the logs tell them apart.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request completed but the server returned a non-success status
    #[error("HTTP error: {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// The request itself failed (DNS, connect, timeout, read)
    #[error("Request failed: {url} - {message}")]
    RequestFailed { url: String, message: String },
}

impl AppError {
    /// Create a configuration error with a custom message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    /// Create a request failure from a reqwest error
    pub fn request_failed<U: Into<String>>(url: U, err: &reqwest::Error) -> Self {
        Self::RequestFailed {
            url: url.into(),
            message: err.to_string(),
        }
    }
}
