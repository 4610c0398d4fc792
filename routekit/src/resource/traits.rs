//! Core trait and errors for resource bundles.
//!
//! A bundle is a named, flat collection of byte resources. Resources are
//! addressed by dotted identifiers built from the bundle name and the segment
//! names of a local [`Route`]: `assets` + `icons/app.png` gives
//! `assets.icons.app.png`.

use std::io::{self, Read};

use thiserror::Error;
use tracing::debug;

use crate::route::{Node, Route};

/// Separator between parts of a resource identifier.
pub const IDENTIFIER_SEPARATOR: char = '.';

/// Errors that can occur while locating or reading a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The route climbs above the bundle root and cannot name a resource.
    #[error("Route '{route}' is not local and cannot address a resource in bundle '{bundle}'")]
    NonLocalRoute { bundle: String, route: Route },

    /// No resource with this identifier exists in the bundle.
    #[error("Resource not found: {identifier}")]
    NotFound { identifier: String },

    /// The resource exists but could not be read.
    #[error("Failed to load resource {identifier}: {source}")]
    Load {
        identifier: String,
        #[source]
        source: io::Error,
    },

    /// The bundle name cannot prefix resource identifiers.
    #[error("Invalid bundle name '{name}': {reason}")]
    InvalidBundleName { name: String, reason: &'static str },

    /// The identifier does not name a single entry of the bundle.
    #[error("Invalid resource identifier '{identifier}'")]
    InvalidIdentifier { identifier: String },

    /// A background read task panicked or was cancelled.
    #[error("Resource task failed: {0}")]
    TaskFailed(String),
}

/// Check that a bundle name is usable as an identifier prefix.
///
/// Names must be non-empty, must not be `.` or `..`, and must not contain a
/// path separator.
pub fn validate_bundle_name(name: &str) -> Result<(), ResourceError> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name == "." || name == ".." {
        "must not be '.' or '..'"
    } else if name.chars().any(std::path::is_separator) {
        "must not contain a path separator"
    } else {
        return Ok(());
    };

    Err(ResourceError::InvalidBundleName {
        name: name.to_string(),
        reason,
    })
}

/// Build the resource identifier for a route within a bundle.
///
/// # Errors
///
/// Returns [`ResourceError::NonLocalRoute`] if the route contains an up-step.
///
/// # Example
///
/// ```
/// use routekit::resource::resource_identifier;
/// use routekit::route::Route;
///
/// let id = resource_identifier("assets", &Route::parse("icons/app.png")).unwrap();
/// assert_eq!(id, "assets.icons.app.png");
///
/// assert!(resource_identifier("assets", &Route::parse("../secrets")).is_err());
/// ```
pub fn resource_identifier(bundle_name: &str, route: &Route) -> Result<String, ResourceError> {
    let mut identifier = String::with_capacity(128);
    identifier.push_str(bundle_name);

    for node in route {
        match node {
            Node::Common(segment) => {
                identifier.push(IDENTIFIER_SEPARATOR);
                identifier.push_str(segment.as_str());
            }
            Node::Back | Node::Current => {
                return Err(ResourceError::NonLocalRoute {
                    bundle: bundle_name.to_string(),
                    route: route.clone(),
                })
            }
        }
    }

    Ok(identifier)
}

/// Boxed reader returned when opening a resource.
pub type ResourceReader = Box<dyn Read + Send>;

/// A named collection of resources addressed by local routes.
///
/// Implementors only provide lookup by identifier; route handling, byte and
/// text reads are provided on top of it.
///
/// # Thread Safety
///
/// Bundles must be `Send + Sync` so they can be shared with blocking tasks
/// (see [`read_bytes_async`](super::read_bytes_async)).
pub trait ResourceBundle: Send + Sync {
    /// Bundle name, used as the first part of every identifier.
    fn name(&self) -> &str;

    /// Open a resource by its full identifier.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::NotFound`] if no such resource exists
    /// - [`ResourceError::Load`] if it exists but cannot be opened
    fn open_identifier(&self, identifier: &str) -> Result<ResourceReader, ResourceError>;

    /// Open the resource a route points to.
    fn open(&self, route: &Route) -> Result<ResourceReader, ResourceError> {
        let identifier = resource_identifier(self.name(), route)?;
        debug!(bundle = self.name(), %route, %identifier, "Opening resource");
        self.open_identifier(&identifier)
    }

    /// Read a resource by identifier to the end.
    fn read_identifier(&self, identifier: &str) -> Result<Vec<u8>, ResourceError> {
        let mut reader = self.open_identifier(identifier)?;
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .map_err(|source| ResourceError::Load {
                identifier: identifier.to_string(),
                source,
            })?;
        Ok(contents)
    }

    /// Read the resource a route points to as bytes.
    fn read_bytes(&self, route: &Route) -> Result<Vec<u8>, ResourceError> {
        let identifier = resource_identifier(self.name(), route)?;
        debug!(bundle = self.name(), %route, %identifier, "Reading resource");
        self.read_identifier(&identifier)
    }

    /// Read the resource a route points to as UTF-8 text.
    fn read_text(&self, route: &Route) -> Result<String, ResourceError> {
        let identifier = resource_identifier(self.name(), route)?;
        let contents = self.read_identifier(&identifier)?;
        String::from_utf8(contents).map_err(|e| ResourceError::Load {
            identifier,
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_of_root_is_bundle_name() {
        assert_eq!(resource_identifier("bundle", &Route::root()).unwrap(), "bundle");
    }

    #[test]
    fn test_identifier_joins_with_dots() {
        let route = Route::parse("resources/text_resource.txt");
        assert_eq!(
            resource_identifier("Tests", &route).unwrap(),
            "Tests.resources.text_resource.txt"
        );
    }

    #[test]
    fn test_identifier_after_cancellation() {
        let route = Route::parse("x/../y");
        assert_eq!(resource_identifier("b", &route).unwrap(), "b.y");
    }

    #[test]
    fn test_identifier_rejects_non_local_route() {
        let err = resource_identifier("bundle", &Route::parse("../outside")).unwrap_err();
        assert!(matches!(err, ResourceError::NonLocalRoute { .. }));
        assert_eq!(
            err.to_string(),
            "Route '../outside' is not local and cannot address a resource in bundle 'bundle'"
        );
    }

    #[test]
    fn test_validate_bundle_name() {
        assert!(validate_bundle_name("assets").is_ok());
        assert!(validate_bundle_name("my.assets").is_ok());

        for name in ["", ".", "..", "../secret.txt", "/etc/passwd", "a/b"] {
            let err = validate_bundle_name(name).unwrap_err();
            assert!(
                matches!(err, ResourceError::InvalidBundleName { .. }),
                "name {:?}",
                name
            );
        }
    }

    #[test]
    fn test_error_display() {
        let err = ResourceError::NotFound {
            identifier: "b.missing".to_string(),
        };
        assert_eq!(err.to_string(), "Resource not found: b.missing");

        let err = ResourceError::Load {
            identifier: "b.file".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to load resource b.file: denied");
    }
}
