//! Error types for widget construction.

use canvasui_core::SceneError;
use thiserror::Error;

/// Problems with a widget's configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value: {0}")]
    Invalid(String),
    #[error("Malformed options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Widget construction errors.
#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// Result type for widget operations.
pub type UiResult<T> = Result<T, UiError>;
