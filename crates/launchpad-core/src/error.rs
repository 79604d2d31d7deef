//! Error types for scene configuration and body lookup.

use thiserror::Error;

/// Errors raised while loading or validating a scene configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body id must not be empty")]
    EmptyBodyId,

    #[error("duplicate body id '{0}'")]
    DuplicateBody(String),

    #[error("body '{body}' has an empty destination url")]
    EmptyUrl { body: String },

    #[error("body '{body}' has region threshold {degrees} outside [0, 90]")]
    InvalidThreshold { body: String, degrees: f64 },
}

/// Errors raised by body registry lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no body with id '{0}'")]
    NotFound(String),
}
