//! In-memory resource bundle.
//!
//! Useful for resources compiled into the binary (`include_bytes!`) and for
//! tests. Contents are stored as [`Bytes`], so opening a resource never copies.

use std::collections::HashMap;

use bytes::{Buf, Bytes};

use super::traits::{resource_identifier, ResourceBundle, ResourceError, ResourceReader};
use crate::route::Route;

/// Resource bundle backed by a map from identifiers to contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundle {
    name: String,
    resources: HashMap<String, Bytes>,
}

impl MemoryBundle {
    /// Create an empty bundle.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resources: HashMap::new(),
        }
    }

    /// Add a resource at a local route.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NonLocalRoute`] if the route climbs above the
    /// bundle root.
    pub fn insert(&mut self, route: &Route, contents: impl Into<Bytes>) -> Result<(), ResourceError> {
        let identifier = resource_identifier(&self.name, route)?;
        self.resources.insert(identifier, contents.into());
        Ok(())
    }

    /// Builder-style [`MemoryBundle::insert`].
    pub fn with_resource(
        mut self,
        route: &Route,
        contents: impl Into<Bytes>,
    ) -> Result<Self, ResourceError> {
        self.insert(route, contents)?;
        Ok(self)
    }

    /// Check whether a route resolves to a stored resource.
    pub fn contains(&self, route: &Route) -> bool {
        resource_identifier(&self.name, route)
            .map(|identifier| self.resources.contains_key(&identifier))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl ResourceBundle for MemoryBundle {
    fn name(&self) -> &str {
        &self.name
    }

    fn open_identifier(&self, identifier: &str) -> Result<ResourceReader, ResourceError> {
        match self.resources.get(identifier) {
            Some(contents) => Ok(Box::new(contents.clone().reader())),
            None => Err(ResourceError::NotFound {
                identifier: identifier.to_string(),
            }),
        }
    }
}
