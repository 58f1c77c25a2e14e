//! Core error types for studygram-core.
//!
//! Timer operations never fail; errors only come from configuration,
//! input validation and the study assistant's HTTP boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studygram-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Study assistant errors
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// Tick source could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// No usable home/config directory
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by a [`TextGenerator`](crate::assistant::TextGenerator).
///
/// These never leave [`StudyAssistant`](crate::assistant::StudyAssistant);
/// they are logged and replaced with a fallback string there.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// API key environment variable is unset or empty
    #[error("API key not configured (set {env_var})")]
    MissingApiKey { env_var: String },

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response
    #[error("Generative service error (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    /// Endpoint could not be built from the configured base URL
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
