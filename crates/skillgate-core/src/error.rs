//! Error types for skillgate

use thiserror::Error;

/// Result type alias for skillgate operations
pub type SkillgateResult<T> = Result<T, SkillgateError>;

/// Main error type for skillgate
///
/// Only the strict loading paths surface these to callers. The activation
/// pipeline itself recovers from every configuration problem locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillgateError {
    /// Rule file is missing or structurally unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single rule entry could not be accepted
    #[error("Invalid rule '{name}': {message}")]
    InvalidRule { name: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

impl SkillgateError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid rule error
    pub fn invalid_rule(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json(message.into())
    }
}

impl From<std::io::Error> for SkillgateError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for SkillgateError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}
