//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{JvmsecError, JvmsecResult};
use crate::layer::Contribution;
use clap::ValueEnum;
use console::style;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> JvmsecResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            let mut updated = config.clone();
            set_value(&mut updated, &key, &value)?;
            manager.save(&updated).await?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> JvmsecResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> JvmsecResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

fn set_value(config: &mut Config, key: &str, value: &str) -> JvmsecResult<()> {
    // Parse dot-separated key path; property keys may contain dots themselves
    match key.split_once('.') {
        Some(("properties", property)) if !property.is_empty() => {
            config
                .properties
                .insert(property.to_string(), value.to_string());
            return Ok(());
        }
        _ => {}
    }

    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(JvmsecError::User(format!(
                    "Invalid log format '{}': expected text or json",
                    value
                )))
            }
        },

        ["buildpack", "id"] => config.buildpack.id = Some(value.to_string()),
        ["buildpack", "name"] => config.buildpack.name = Some(value.to_string()),
        ["buildpack", "version"] => config.buildpack.version = Some(value.to_string()),

        ["layer", "name"] => config.layer.name = value.to_string(),
        ["layer", "contribution"] => {
            config.layer.contribution = Contribution::from_str(value, true).map_err(|_| {
                JvmsecError::User(format!(
                    "Invalid contribution '{}': expected none, build or launch",
                    value
                ))
            })?
        }

        _ => return Err(JvmsecError::User(format!("Unknown config key: {}", key))),
    }

    Ok(())
}
