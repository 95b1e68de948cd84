//! Error types for jvmsec
//!
//! All modules use `JvmsecResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jvmsec operations
pub type JvmsecResult<T> = Result<T, JvmsecError>;

/// All errors that can occur in jvmsec
#[derive(Error, Debug)]
pub enum JvmsecError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Buildpack errors
    #[error("Invalid buildpack descriptor at {path}: {reason}")]
    BuildpackInvalid { path: PathBuf, reason: String },

    #[error("Buildpack identity incomplete: missing {0}")]
    BuildpackIncomplete(&'static str),

    // Layer errors
    #[error("Invalid layer name '{name}': {reason}")]
    LayerNameInvalid { name: String, reason: String },

    #[error("Layers directory not set")]
    LayersDirMissing,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {path}: {reason}")]
    PathInvalid { path: PathBuf, reason: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl JvmsecError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::LayersDirMissing => Some("Pass LAYERS_DIR or set CNB_LAYERS_DIR"),
            Self::BuildpackIncomplete(_) => Some(
                "Pass --buildpack-dir, set CNB_BUILDPACK_DIR, or set [buildpack] in the config file",
            ),
            Self::ConfigInvalid { .. } => Some("Fix or remove the file at the reported path"),
            _ => None,
        }
    }
}
