//! Domain error types
//!
//! This module defines the error hierarchy for mods-fetcher. Errors are split
//! along the line the export driver cares about: failures while enumerating
//! collections abort the run, while failures on a single record are logged
//! and the run continues.
//! None of the variants expose third-party types.

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum FetcherError {
    /// The configuration file could not be opened or read
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// A required configuration key is missing or holds an invalid value
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote repository errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Fetching or writing the metadata of a single object failed
    #[error("Failed to export MODS for {pid}: {reason}")]
    FetchFailed {
        /// Identifier of the object whose record could not be exported
        pid: String,
        /// Underlying cause
        reason: String,
    },

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FetcherError {
    /// Build a [`FetcherError::FetchFailed`] for the given object
    pub fn fetch_failed(pid: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        FetcherError::FetchFailed {
            pid: pid.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the driver may log this error and move on to the next record
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetcherError::FetchFailed { .. })
    }
}

/// Fedora repository errors
///
/// Errors that occur when talking to the Fedora server.
/// These errors don't expose the HTTP client's types.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Failed to reach the Fedora server
    #[error("Failed to connect to Fedora server: {0}")]
    ConnectionFailed(String),

    /// A resource index search failed
    #[error("Resource index query failed: {0}")]
    QueryFailed(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// The response body could not be read
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl RepositoryError {
    /// Map a non-success HTTP status to the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status >= 500 {
            RepositoryError::ServerError { status, message }
        } else {
            RepositoryError::ClientError { status, message }
        }
    }
}

impl From<std::io::Error> for FetcherError {
    fn from(err: std::io::Error) -> Self {
        FetcherError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FetcherError {
    fn from(err: serde_json::Error) -> Self {
        FetcherError::Serialization(err.to_string())
    }
}
