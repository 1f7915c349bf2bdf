//! Error types.
//!
//! `SceneError` values never cross the engine boundary: the engine logs them
//! and carries on. `ConfigError` is returned by scene loading.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// A required collaborator reference is absent.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
    /// An input value outside its valid bounds.
    #[error("{what} {value} out of range {min}..={max}")]
    OutOfRangeInput {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl SceneError {
    pub fn missing(what: impl Into<String>) -> Self {
        SceneError::ConfigurationMissing(what.into())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid scene: {0}")]
    Invalid(String),
}
