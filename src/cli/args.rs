//! CLI argument definitions using clap derive

use crate::layer::Contribution;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// jvmsec - Java security properties for buildpack layers
///
/// Writes java-security.properties into a Cloud Native Buildpacks layer
/// and points JAVA_OPTS and JAVA_SECURITY_PROPERTIES at it.
#[derive(Parser, Debug)]
#[command(name = "jvmsec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "JVMSEC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Contribute java-security.properties to a layer
    Contribute(ContributeArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the contribute command
#[derive(Parser, Debug)]
pub struct ContributeArgs {
    /// Layers directory handed to the buildpack
    #[arg(env = "CNB_LAYERS_DIR")]
    pub layers_dir: Option<PathBuf>,

    /// Layer name (defaults to config layer.name)
    #[arg(short, long)]
    pub layer: Option<String>,

    /// Where the layer is made available (defaults to config layer.contribution)
    #[arg(long, value_enum)]
    pub contribution: Option<Contribution>,

    /// Buildpack directory containing buildpack.toml
    #[arg(long, env = "CNB_BUILDPACK_DIR")]
    pub buildpack_dir: Option<PathBuf>,

    /// Buildpack id, used without --buildpack-dir
    #[arg(long)]
    pub buildpack_id: Option<String>,

    /// Buildpack name, used without --buildpack-dir
    #[arg(long)]
    pub buildpack_name: Option<String>,

    /// Buildpack version, used without --buildpack-dir
    #[arg(long)]
    pub buildpack_version: Option<String>,

    /// Additional security properties (KEY=VALUE)
    #[arg(short = 'p', long = "property", value_parser = parse_property)]
    pub properties: Vec<(String, String)>,

    /// Print the contributed layer as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., layer.contribution)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Parse a KEY=VALUE property
fn parse_property(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE format: no '=' found in '{s}'"))?;
    if pos == 0 {
        return Err(format!("invalid KEY=VALUE format: empty key in '{s}'"));
    }
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
