//! Buildpack layers
//!
//! A layer is a directory `<layers>/<name>/` plus a sibling
//! `<layers>/<name>.toml` holding its types and metadata. Environment
//! modifications live as files under the layer's `env/`, `env.build/`
//! and `env.launch/` directories.

pub mod contribution;
pub mod environment;

pub use contribution::{Contribution, LayerContributor};
pub use environment::{EnvKey, EnvOp, Environment};

use crate::error::{JvmsecError, JvmsecResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lifecycle flags of a layer, the `[types]` table of `<name>.toml`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerTypes {
    /// Visible to subsequent buildpacks during the build
    pub build: bool,

    /// Restored on the next build
    pub cache: bool,

    /// Exported into the launch image
    pub launch: bool,
}

/// On-disk shape of `<layers>/<name>.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct LayerMetadataFile {
    types: LayerTypes,
    metadata: toml::Table,
}

/// A single layer handle
#[derive(Debug, Clone, Serialize)]
pub struct Layer {
    /// Layer name (directory name under the layers root)
    pub name: String,

    /// Absolute layer directory
    pub path: PathBuf,

    pub types: LayerTypes,

    /// Written to `env/`, applies to build and launch
    pub shared_environment: Environment,

    /// Written to `env.build/`
    pub build_environment: Environment,

    /// Written to `env.launch/`
    pub launch_environment: Environment,

    /// Free-form `[metadata]` table
    pub metadata: toml::Table,
}

impl Layer {
    /// Create an empty, uncontributed layer handle
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            types: LayerTypes::default(),
            shared_environment: Environment::new(),
            build_environment: Environment::new(),
            launch_environment: Environment::new(),
            metadata: toml::Table::new(),
        }
    }
}

/// The layers root directory handed to a buildpack
#[derive(Debug, Clone)]
pub struct Layers {
    pub path: PathBuf,
}

impl Layers {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn metadata_path(&self, name: &str) -> PathBuf {
        self.path.join(format!("{}.toml", name))
    }

    /// Open (creating if needed) the layer called `name`.
    ///
    /// The returned layer path is absolute even for a relative root.
    /// Metadata from a previous `<name>.toml` is loaded; types and
    /// environments start empty.
    pub fn layer(&self, name: &str) -> JvmsecResult<Layer> {
        validate_layer_name(name)?;

        let path = self.path.join(name);
        std::fs::create_dir_all(&path)
            .map_err(|e| JvmsecError::io(format!("creating layer {}", path.display()), e))?;
        let path = std::path::absolute(&path)
            .map_err(|e| JvmsecError::io(format!("resolving layer path {}", path.display()), e))?;

        let mut layer = Layer::new(name, path);

        let metadata_path = self.metadata_path(name);
        if metadata_path.is_file() {
            debug!("Loading layer metadata {}", metadata_path.display());
            let file = read_metadata_file(&metadata_path)?;
            layer.metadata = file.metadata;
        }

        Ok(layer)
    }

    /// Write `<name>.toml` and the layer's environment directories
    pub fn persist(&self, layer: &Layer) -> JvmsecResult<()> {
        validate_layer_name(&layer.name)?;

        layer.shared_environment.write_to(&layer.path.join("env"))?;
        layer.build_environment.write_to(&layer.path.join("env.build"))?;
        layer
            .launch_environment
            .write_to(&layer.path.join("env.launch"))?;

        let file = LayerMetadataFile {
            types: layer.types,
            metadata: layer.metadata.clone(),
        };
        let content = toml::to_string_pretty(&file)?;
        let metadata_path = self.metadata_path(&layer.name);
        std::fs::write(&metadata_path, content)
            .map_err(|e| JvmsecError::io(format!("writing {}", metadata_path.display()), e))?;

        debug!(
            "Persisted layer {} (build={}, cache={}, launch={})",
            layer.name, layer.types.build, layer.types.cache, layer.types.launch
        );
        Ok(())
    }

    /// Open `name`, run `contributor` on it and persist the result.
    ///
    /// Nothing is persisted if the contributor fails.
    pub fn contribute(
        &self,
        name: &str,
        contributor: &dyn LayerContributor,
    ) -> JvmsecResult<Layer> {
        debug!("Contributing layer {} with {}", name, contributor.name());
        let layer = self.layer(name)?;
        let layer = contributor.contribute(layer)?;
        self.persist(&layer)?;
        Ok(layer)
    }

    /// Read back the types recorded in `<name>.toml`, if any
    #[cfg(test)]
    pub fn recorded_types(&self, name: &str) -> JvmsecResult<Option<LayerTypes>> {
        validate_layer_name(name)?;
        let metadata_path = self.metadata_path(name);
        if !metadata_path.is_file() {
            return Ok(None);
        }
        Ok(Some(read_metadata_file(&metadata_path)?.types))
    }
}

fn read_metadata_file(path: &Path) -> JvmsecResult<LayerMetadataFile> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| JvmsecError::io(format!("reading {}", path.display()), e))?;
    toml::from_str(&content).map_err(|e| JvmsecError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Validate that a layer name is safe (no path traversal, no special characters).
fn validate_layer_name(name: &str) -> JvmsecResult<()> {
    let invalid = |reason: &str| JvmsecError::LayerNameInvalid {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.starts_with('.') || name.contains("..") {
        return Err(invalid("must not start with '.' or contain '..'"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(invalid(
            "must contain only alphanumeric characters, hyphens, underscores, or dots",
        ));
    }
    Ok(())
}
