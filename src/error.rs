//! Error types for envcheck operations.
//!
//! This module defines [`EnvCheckError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Checks never return errors to the runner; each check converts an
//!   `EnvCheckError` into an `error` status result at its own boundary
//! - Only configuration loading can stop the process before checks run
//! - Use `anyhow::Error` (via `EnvCheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for envcheck operations.
#[derive(Debug, Error)]
pub enum EnvCheckError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// No Python interpreter could be located.
    #[error("Python interpreter not found (looked for: {candidates})")]
    InterpreterNotFound { candidates: String },

    /// The interpreter was found but could not be queried.
    #[error("Failed to probe interpreter {path}: {message}")]
    InterpreterProbeFailed { path: PathBuf, message: String },

    /// A child process could not be launched.
    #[error("Failed to run {command}: {message}")]
    CommandFailed { command: String, message: String },

    /// The report could not be written.
    #[error("Failed to write report to {path}: {message}")]
    ReportWriteFailed { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for envcheck operations.
pub type Result<T> = std::result::Result<T, EnvCheckError>;
