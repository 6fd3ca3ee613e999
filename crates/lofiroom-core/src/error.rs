//! Core error types for lofiroom-core.
//!
//! This module defines the error hierarchy using thiserror. Nothing in the
//! core retries on its own: failures travel outward so the front-end can
//! decide what the listener sees.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lofiroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Playback errors, including audio engine failures
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Failures reported by an audio engine.
///
/// The core has no fallback source, so these are handed to the caller as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The requested source could not be opened or decoded
    #[error("Audio source '{locator}' unavailable: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    /// The output device failed
    #[error("Audio device error: {0}")]
    Device(String),
}

/// Playback-controller errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// Engine failure, surfaced unchanged
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Volume or other argument out of range
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

impl From<EngineError> for CoreError {
    fn from(err: EngineError) -> Self {
        CoreError::Playback(PlaybackError::Engine(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
