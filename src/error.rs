//! Error types for the Leave Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The leave calculations themselves never fail; errors only arise at the
//! configuration and request boundaries.

use thiserror::Error;

/// The main error type for the Leave Engine.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An organization setting row carried a value that could not be decoded.
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The setting key.
        key: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A request was structurally valid JSON but semantically unusable.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
