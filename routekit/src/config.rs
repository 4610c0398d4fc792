//! INI configuration file.
//!
//! The configuration lives at `~/.routekit/config.ini`:
//!
//! ```ini
//! [resources]
//! directory = ~/.routekit/resources
//! base_name = assets
//!
//! [logging]
//! level = info
//! file = ~/.routekit/routekit.log
//! ```
//!
//! A missing file yields the defaults. Unknown sections and keys are ignored.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::logging::LoggingConfig;
use crate::resource::{validate_bundle_name, ResourceError};

/// Name of the configuration directory under the home directory.
pub const CONFIG_DIR_NAME: &str = ".routekit";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default bundle name for resource lookups.
pub const DEFAULT_BASE_NAME: &str = "resources";

/// Log levels accepted in `[logging] level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    /// The file could not be written.
    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value is present but not acceptable.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The key is not a known `section.key` name.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[resources]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcesConfig {
    /// Directory of a [`DirectoryBundle`](crate::resource::DirectoryBundle).
    pub directory: PathBuf,
    /// Bundle name, the first part of every resource identifier.
    pub base_name: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            directory: config_directory().join("resources"),
            base_name: DEFAULT_BASE_NAME.to_string(),
        }
    }
}

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub resources: ResourcesConfig,
    pub logging: LoggingConfig,
}

/// The `~/.routekit` directory.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// The default configuration file path.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

impl ConfigFile {
    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from a specific file, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ini(&ini)
    }

    /// Build a configuration from parsed INI data.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for key in ConfigKey::ALL {
            if let Some(value) = ini.get_from(Some(key.section()), key.name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Render as INI data.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::ALL {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section())).set(key.name(), value);
            }
        }
        ini
    }

    /// Write to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Write to a file, creating its parent directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        self.to_ini().write_to_file(path).map_err(write_error)
    }
}

/// A settable configuration key, written `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ResourcesDirectory,
    ResourcesBaseName,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// All keys in display order.
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::ResourcesDirectory,
        ConfigKey::ResourcesBaseName,
        ConfigKey::LoggingLevel,
        ConfigKey::LoggingFile,
    ];

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ResourcesDirectory | ConfigKey::ResourcesBaseName => "resources",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::ResourcesDirectory => "directory",
            ConfigKey::ResourcesBaseName => "base_name",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ResourcesDirectory => config.resources.directory.display().to_string(),
            ConfigKey::ResourcesBaseName => config.resources.base_name.clone(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ResourcesDirectory => {
                config.resources.directory = expand_tilde(value);
            }
            ConfigKey::ResourcesBaseName => {
                if let Err(ResourceError::InvalidBundleName { reason, .. }) =
                    validate_bundle_name(value)
                {
                    return Err(self.invalid(value, reason));
                }
                config.resources.base_name = value.to_string();
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, &format!("expected one of {}", LOG_LEVELS.join(", "))));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = (!value.is_empty()).then(|| expand_tilde(value));
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.to_string() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
