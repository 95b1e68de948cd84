//! Contribute command - write java-security.properties into a layer

use crate::buildpack::BuildpackInfo;
use crate::cli::args::ContributeArgs;
use crate::config::Config;
use crate::error::{JvmsecError, JvmsecResult};
use crate::layer::{Layer, Layers};
use crate::security::{JavaSecurityProperties, PropertiesTemplate, PROPERTIES_FILE};
use console::style;
use tracing::debug;

/// Execute the contribute command
pub async fn execute(args: ContributeArgs, config: &Config) -> JvmsecResult<()> {
    let layers_dir = args
        .layers_dir
        .clone()
        .ok_or(JvmsecError::LayersDirMissing)?;
    let buildpack = resolve_buildpack(&args, config).await?;
    let layer_name = args
        .layer
        .clone()
        .unwrap_or_else(|| config.layer.name.clone());
    let contribution = args.contribution.unwrap_or(config.layer.contribution);

    // Command-line properties win over configured ones
    let mut template = PropertiesTemplate::with_entries(config.properties.clone());
    for (key, value) in args.properties {
        template.insert(key, value);
    }

    debug!(
        "Contributing {} to {}/{} for {} ({:?}, {} properties)",
        PROPERTIES_FILE,
        layers_dir.display(),
        layer_name,
        buildpack.id,
        contribution,
        template.len()
    );

    let contributor = JavaSecurityProperties::with_source(buildpack, contribution, template);
    let layers = Layers::new(layers_dir);
    let layer = tokio::task::spawn_blocking(move || layers.contribute(&layer_name, &contributor))
        .await
        .map_err(|e| JvmsecError::Internal(format!("contribution task failed: {e}")))??;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layer)?);
    } else {
        print_summary(&layer);
    }

    Ok(())
}

/// Buildpack identity from `buildpack.toml`, flags, then config
async fn resolve_buildpack(args: &ContributeArgs, config: &Config) -> JvmsecResult<BuildpackInfo> {
    if let Some(ref dir) = args.buildpack_dir {
        debug!("Reading buildpack identity from {}", dir.display());
        return BuildpackInfo::from_dir(dir).await;
    }

    let name = args
        .buildpack_name
        .clone()
        .or_else(|| config.buildpack.name.clone())
        .ok_or(JvmsecError::BuildpackIncomplete("name"))?;
    let id = args
        .buildpack_id
        .clone()
        .or_else(|| config.buildpack.id.clone())
        .unwrap_or_else(|| name.clone());
    let version = args
        .buildpack_version
        .clone()
        .or_else(|| config.buildpack.version.clone())
        .unwrap_or_default();

    Ok(BuildpackInfo::new(id, name, version))
}

fn print_summary(layer: &Layer) {
    println!(
        "{} Contributed {} to {}",
        style("✓").green(),
        PROPERTIES_FILE,
        style(layer.path.display()).cyan()
    );
    for (key, value) in layer.shared_environment.iter() {
        println!("  {} = {}", style(key).bold(), value);
    }
    println!(
        "  build={} cache={} launch={}",
        layer.types.build, layer.types.cache, layer.types.launch
    );
}
