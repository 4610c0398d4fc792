//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::io::Write;
use std::path::Path;

use clap::Subcommand;
use routekit::config::{ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., resources.base_name)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., resources.base_name)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the file at `path`.
pub fn run(command: ConfigCommands, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key, path, out),
        ConfigCommands::Set { key, value } => run_set(&key, &value, path, out),
        ConfigCommands::List => run_list(path, out),
        ConfigCommands::Path => print(out, &path.display().to_string()),
    }
}

fn print(out: &mut impl Write, line: &str) -> Result<(), CliError> {
    writeln!(out, "{}", line).map_err(|e| CliError::Output(e.to_string()))
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'routekit config list' to see available keys.",
            key
        ))
    })
}

/// Get a configuration value.
fn run_get(key: &str, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    let value = config_key.get(&config);

    if value.is_empty() {
        print(out, "(not set)")
    } else {
        print(out, &value)
    }
}

/// Set a configuration value.
fn run_set(key: &str, value: &str, path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load_from(path)?;
    config_key.set(&mut config, value)?;
    config.save_to(path)?;

    tracing::info!(key = %config_key, path = %path.display(), "Configuration updated");
    print(out, &format!("Set {} = {}", config_key, value))
}

/// List all configuration settings.
fn run_list(path: &Path, out: &mut impl Write) -> Result<(), CliError> {
    let config = ConfigFile::load_from(path)?;

    print(out, "Configuration Settings")?;
    print(out, "======================")?;

    let mut current_section = "";

    for key in ConfigKey::ALL {
        let section = key.section();

        // Print section header when section changes
        if section != current_section {
            print(out, "")?;
            print(out, &format!("[{}]", section))?;
            current_section = section;
        }

        let value = key.get(&config);
        if value.is_empty() {
            print(out, &format!("  {} = (not set)", key.name()))?;
        } else {
            print(out, &format!("  {} = {}", key.name(), value))?;
        }
    }

    Ok(())
}
