//! Resource bundle backed by a flat directory.
//!
//! Each resource is a regular file named by its full identifier, e.g.
//! `assets.icons.app.png` inside the bundle directory. Bundle names are
//! validated on construction and identifiers that are not a single plain
//! file name are refused, so lookups cannot leave the directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::traits::{validate_bundle_name, ResourceBundle, ResourceError, ResourceReader};

/// Resource bundle reading files from a directory.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    name: String,
    directory: PathBuf,
}

impl DirectoryBundle {
    /// Create a bundle for `directory`. The directory is not checked until a
    /// resource is opened.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidBundleName`] if `name` is empty, `.` or
    /// `..`, or contains a path separator.
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
    ) -> Result<Self, ResourceError> {
        let name = name.into();
        validate_bundle_name(&name)?;
        Ok(Self {
            name,
            directory: directory.into(),
        })
    }

    /// The bundle directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Filesystem location of a resource identifier.
    pub fn resource_path(&self, identifier: &str) -> PathBuf {
        self.directory.join(identifier)
    }
}

impl ResourceBundle for DirectoryBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_identifier(&self, identifier: &str) -> Result<ResourceReader, ResourceError> {
        let plain_name = !matches!(identifier, "" | "." | "..")
            && !identifier.chars().any(std::path::is_separator);
        if !plain_name {
            return Err(ResourceError::InvalidIdentifier {
                identifier: identifier.to_string(),
            });
        }

        let path = self.resource_path(identifier);

        match File::open(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "Opened resource file");
                Ok(Box::new(file))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(bundle = %self.name, identifier, "Resource not found");
                Err(ResourceError::NotFound {
                    identifier: identifier.to_string(),
                })
            }
            Err(source) => Err(ResourceError::Load {
                identifier: identifier.to_string(),
                source,
            }),
        }
    }
}
