//! Error types for Praxis
//!
//! Cache misses and permission denials are ordinary values, not errors.
//! Errors exist for config I/O, malformed JSON and unknown role names.

use thiserror::Error;

/// Error raised when a role name is not present in the role matrix
#[derive(Debug, Error)]
#[error("Role '{role_name}' not found. Available roles: {}", available_roles.join(", "))]
pub struct RoleNotFoundError {
    pub role_name: String,
    pub available_roles: Vec<String>,
}

/// General Praxis error type
#[derive(Debug, Error)]
pub enum PraxisError {
    #[error(transparent)]
    RoleNotFound(#[from] RoleNotFoundError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PraxisError>;
