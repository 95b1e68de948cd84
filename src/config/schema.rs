//! Configuration schema for jvmsec
//!
//! Configuration is stored at `~/.config/jvmsec/config.toml`

use crate::layer::Contribution;
use crate::security::CONTRIBUTOR_NAME;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Fallback buildpack identity
    pub buildpack: BuildpackConfig,

    /// Target layer settings
    pub layer: LayerConfig,

    /// Entries written to java-security.properties
    pub properties: BTreeMap<String, String>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Buildpack identity used when no `buildpack.toml` is available
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackConfig {
    pub id: Option<String>,

    pub name: Option<String>,

    pub version: Option<String>,
}

/// Layer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    /// Layer name under the layers directory
    pub name: String,

    /// none, build or launch
    pub contribution: Contribution,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: CONTRIBUTOR_NAME.to_string(),
            contribution: Contribution::Launch,
        }
    }
}
