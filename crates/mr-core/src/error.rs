//! Error types for mr-core

use thiserror::Error;

/// Core error type for migrun
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Selected migration is not configured
    #[error("[E004] Migration {sequence} not found. Configured migrations: {available}")]
    MigrationNotFound { sequence: u32, available: String },

    /// E005: Migration selector could not be parsed
    #[error("[E005] Invalid migration selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// E006: A credential required by the chosen backend is not set
    #[error("[E006] Missing credential: set {var} ({purpose})")]
    MissingCredential {
        var: &'static str,
        purpose: &'static str,
    },

    /// E007: IO error with file path context
    #[error("[E007] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
