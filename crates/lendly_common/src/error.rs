use std::fmt;
use thiserror::Error;

/// The base error type shared by all Lendly crates.
///
/// Crates keep their own error enums and implement `From<TheirError> for LendlyError`
/// so a host can deal with a single type at its boundary.
#[derive(Error, Debug)]
pub enum LendlyError {
    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No signed-in user, or the user may not perform the action
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred while reading or writing the record store
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error occurred due to a conflict (e.g. dates already booked)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Adds context to foreign errors while converting them into `LendlyError`.
pub trait Context<T, E> {
    fn context<C>(self, context: C) -> Result<T, LendlyError>
    where
        C: fmt::Display + Send + Sync + 'static;

    fn with_context<C, F>(self, f: F) -> Result<T, LendlyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, LendlyError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| LendlyError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, LendlyError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| LendlyError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<serde_json::Error> for LendlyError {
    fn from(err: serde_json::Error) -> Self {
        LendlyError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for LendlyError {
    fn from(err: std::io::Error) -> Self {
        LendlyError::StorageError(err.to_string())
    }
}

impl From<chrono::ParseError> for LendlyError {
    fn from(err: chrono::ParseError) -> Self {
        LendlyError::ParseError(err.to_string())
    }
}

impl From<lendly_config::SettingError> for LendlyError {
    fn from(err: lendly_config::SettingError) -> Self {
        LendlyError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> LendlyError {
    LendlyError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> LendlyError {
    LendlyError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> LendlyError {
    LendlyError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> LendlyError {
    LendlyError::ConflictError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> LendlyError {
    LendlyError::InternalError(message.to_string())
}
