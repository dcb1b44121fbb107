//! Error types for cmdkit
//!
//! The command-line classifier itself never fails; these errors come from
//! the helpers and handlers that sit around it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cmdkit
#[derive(Error, Debug)]
pub enum AppError {
    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid glob pattern passed to a file listing
    #[error("Invalid file pattern: {pattern}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Settings file could not be read or parsed
    #[error("Settings error: {message}")]
    Settings {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Version string errors
    #[error("Version error: {message} ('{input}')")]
    Version { message: String, input: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl AppError {
    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new pattern error
    pub fn pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a new settings error
    pub fn settings<P: Into<PathBuf>>(
        message: impl Into<String>,
        path: P,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Settings {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new version error
    pub fn version(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
            input: input.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
