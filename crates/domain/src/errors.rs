//! Error types used throughout the application

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MedLink
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum PortalError {
    /// Required or malformed input. Carries the per-field map returned to
    /// callers, keyed by wire field name with `true` marking the offender.
    #[error("{message}")]
    Validation { message: String, fields: BTreeMap<String, bool> },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Operation disabled for the profile type (no write surface exists).
    #[error("{0}")]
    Unsupported(String),

    /// Failure in an external collaborator such as the media store.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PortalError {
    /// Build a validation error with its field map.
    pub fn validation(message: impl Into<String>, fields: BTreeMap<String, bool>) -> Self {
        Self::Validation { message: message.into(), fields }
    }
}

/// Result type alias for MedLink operations
pub type Result<T> = std::result::Result<T, PortalError>;
