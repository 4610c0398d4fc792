//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use routekit::config::{config_file_path, ConfigFile};
use routekit::resource::DirectoryBundle;

use crate::error::CliError;

/// Configuration file to use: the `--config` flag, else the default location.
pub fn resolve_config_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config_file_path)
}

/// Load configuration, defaulting when the file does not exist.
pub fn load_config(path: &Path) -> Result<ConfigFile, CliError> {
    Ok(ConfigFile::load_from(path)?)
}

/// Resolve the resource bundle from CLI args and config.
pub fn resolve_bundle(
    cli_directory: Option<PathBuf>,
    cli_base_name: Option<String>,
    config: &ConfigFile,
) -> Result<DirectoryBundle, CliError> {
    // CLI takes precedence, then config
    let directory = cli_directory.unwrap_or_else(|| config.resources.directory.clone());
    let base_name = cli_base_name.unwrap_or_else(|| config.resources.base_name.clone());

    Ok(DirectoryBundle::new(base_name, directory)?)
}
