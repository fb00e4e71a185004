//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A queue name resolved to an empty string.
    #[error("invalid queue name from {var}: must not be empty")]
    EmptyQueueName { var: &'static str },

    /// Retry interval could not be parsed as milliseconds.
    #[error("failed to parse retry interval '{value}': {source}")]
    RetryIntervalParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Retry interval of zero would busy-loop the poll paths.
    #[error("invalid retry interval '{value}': must be at least 1 millisecond")]
    ZeroRetryInterval { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },
}
