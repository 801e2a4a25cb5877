//! Error types for appdrawer.
//!
//! Parse problems never show up here: unreadable or malformed descriptors
//! degrade to an empty field set (see [`crate::descriptor::parse_descriptor`]).
//! What remains are file-system failures and input rejected before any
//! mutation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the appdrawer library.
#[derive(Debug, Error)]
pub enum DrawerError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("File not found: {0}")]
    NotFound(PathBuf),

    // Policy errors
    #[error("Not a launcher managed by appdrawer: {0}")]
    NotManaged(PathBuf),

    // Validation errors
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for appdrawer operations.
pub type Result<T> = std::result::Result<T, DrawerError>;

/// Coarse classification used by front ends to pick a notice style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A write, copy or delete failed part way.
    Io,
    /// The request was rejected before touching the file system.
    Validation,
    Other,
}

impl From<std::io::Error> for DrawerError {
    fn from(err: std::io::Error) -> Self {
        DrawerError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl DrawerError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        DrawerError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create a validation error for a named input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DrawerError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DrawerError::Io { .. } | DrawerError::NotFound(_) => ErrorKind::Io,
            DrawerError::Validation { .. } | DrawerError::NotManaged(_) => ErrorKind::Validation,
            DrawerError::Config { .. } | DrawerError::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if the failure happened before any file was touched.
    pub fn is_rejection(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
