//! Error types for the router

use thiserror::Error;

/// Result type alias for the router
pub type Result<T> = std::result::Result<T, RouterError>;

/// Main error type for the router crate
///
/// Returned by configuration loading, request construction and router
/// assembly. Routing itself reports failures inside `ChatResponse`.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
