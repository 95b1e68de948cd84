//! Configuration management for jvmsec

pub mod schema;

pub use schema::Config;

use crate::error::{JvmsecError, JvmsecResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Loads and saves `config.toml`, which supplies the layer name, the
/// contribution flag, a fallback buildpack identity and the
/// `[properties]` entries written to java-security.properties
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jvmsec")
            .join("config.toml")
    }

    /// Load configuration. A missing file yields defaults: the
    /// `java-security-properties` launch layer and no extra properties.
    pub async fn load(&self) -> JvmsecResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> JvmsecResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| JvmsecError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| JvmsecError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration, creating the parent directory (used by `config init` and `config set`)
    pub async fn save(&self, config: &Config) -> JvmsecResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            JvmsecError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    async fn ensure_config_dir(&self) -> JvmsecResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| JvmsecError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
