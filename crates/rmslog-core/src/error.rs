//! Application error types with rich context
//!
//! The job-block parser itself never fails: malformed input degrades to
//! empty or unknown fields. These errors cover the layers around it
//! (reading documents, configuration, serialization).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Log document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Log document is empty: {path}")]
    EmptyDocument { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Logging Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn document_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DocumentNotFound { path: path.into() }
    }

    pub fn empty_document(path: impl Into<PathBuf>) -> Self {
        Self::EmptyDocument { path: path.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors fall back to defaults (e.g. default settings)
    /// instead of stopping the command.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Config { .. } | Error::EmptyDocument { .. } | Error::Logging { .. }
        )
    }

    /// Check if this error should stop the command
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::DocumentNotFound { .. } | Error::ConfigInvalid { .. } | Error::Io(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
