//! `java-security.properties` layer contributor

use crate::buildpack::BuildpackInfo;
use crate::error::{JvmsecError, JvmsecResult};
use crate::layer::{Contribution, Layer, LayerContributor};
use crate::security::properties::{PropertiesSource, PropertiesTemplate};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// File written inside the layer directory
pub const PROPERTIES_FILE: &str = "java-security.properties";

/// Appended with the `-Djava.security.properties` flag
pub const JAVA_OPTS: &str = "JAVA_OPTS";

/// Overridden with the properties file path
pub const JAVA_SECURITY_PROPERTIES: &str = "JAVA_SECURITY_PROPERTIES";

/// Contributor name, also the metadata table key
pub const CONTRIBUTOR_NAME: &str = "java-security-properties";

/// Contributes a Java security properties file to a layer
#[derive(Debug, Clone)]
pub struct JavaSecurityProperties<S = PropertiesTemplate> {
    buildpack: BuildpackInfo,
    contribution: Contribution,
    source: S,
}

impl JavaSecurityProperties<PropertiesTemplate> {
    /// Contributor writing a header-only properties file
    pub fn new(buildpack: BuildpackInfo, contribution: Contribution) -> Self {
        Self::with_source(buildpack, contribution, PropertiesTemplate::new())
    }
}

impl<S: PropertiesSource> JavaSecurityProperties<S> {
    pub fn with_source(buildpack: BuildpackInfo, contribution: Contribution, source: S) -> Self {
        Self {
            buildpack,
            contribution,
            source,
        }
    }
}

impl<S: PropertiesSource> LayerContributor for JavaSecurityProperties<S> {
    fn name(&self) -> &str {
        CONTRIBUTOR_NAME
    }

    fn contribute(&self, mut layer: Layer) -> JvmsecResult<Layer> {
        std::fs::create_dir_all(&layer.path)
            .map_err(|e| JvmsecError::io(format!("creating layer {}", layer.path.display()), e))?;

        // Env values carry this path and must not depend on the cwd
        let resolved = std::path::absolute(&layer.path).map_err(|e| {
            JvmsecError::io(format!("resolving layer path {}", layer.path.display()), e)
        })?;
        layer.path = resolved;

        let file = layer.path.join(PROPERTIES_FILE);
        let file_str = file
            .to_str()
            .ok_or_else(|| JvmsecError::PathInvalid {
                path: file.clone(),
                reason: "not valid UTF-8".to_string(),
            })?
            .to_string();

        let content = self.source.render(&self.buildpack);
        debug!("Writing {} ({} bytes)", file_str, content.len());
        std::fs::write(&file, content.as_bytes())
            .map_err(|e| JvmsecError::io(format!("writing {}", file_str), e))?;

        layer
            .shared_environment
            .append(JAVA_OPTS, format!(" -Djava.security.properties={}", file_str));
        layer
            .shared_environment
            .override_value(JAVA_SECURITY_PROPERTIES, file_str.as_str());

        let digest = hex::encode(Sha256::digest(content.as_bytes()));
        let mut record = toml::Table::new();
        record.insert("sha256".to_string(), toml::Value::String(digest));
        layer
            .metadata
            .insert(CONTRIBUTOR_NAME.to_string(), toml::Value::Table(record));

        self.contribution.apply(&mut layer);

        info!(
            "Contributed {} to layer {} ({:?})",
            PROPERTIES_FILE, layer.name, self.contribution
        );
        Ok(layer)
    }
}
