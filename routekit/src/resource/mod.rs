//! Resource lookup by route.
//!
//! This module adapts [`Route`]s to named resource bundles. A bundle turns a
//! local route into a dotted identifier (`bundle.dir.file.ext`) and opens the
//! resource stored under it. Routes that climb above the bundle root are
//! rejected before any lookup happens.
//!
//! # Providers
//!
//! - [`MemoryBundle`]: identifiers mapped to in-memory contents
//! - [`DirectoryBundle`]: one file per identifier in a flat directory
//!
//! # Example
//!
//! ```
//! use routekit::resource::{MemoryBundle, ResourceBundle};
//! use routekit::route::Route;
//!
//! let bundle = MemoryBundle::new("assets")
//!     .with_resource(&Route::parse("greeting.txt"), "hello")
//!     .unwrap();
//!
//! assert_eq!(bundle.read_text(&Route::parse("greeting.txt")).unwrap(), "hello");
//! ```

mod directory;
mod memory;
mod traits;

pub use directory::DirectoryBundle;
pub use memory::MemoryBundle;
pub use traits::{
    resource_identifier, validate_bundle_name, ResourceBundle, ResourceError, ResourceReader,
    IDENTIFIER_SEPARATOR,
};

use std::sync::Arc;

use crate::route::Route;

/// Read a resource as bytes on the blocking thread pool.
///
/// # Errors
///
/// Same as [`ResourceBundle::read_bytes`], plus [`ResourceError::TaskFailed`]
/// if the blocking task does not complete.
pub async fn read_bytes_async<B>(bundle: Arc<B>, route: Route) -> Result<Vec<u8>, ResourceError>
where
    B: ResourceBundle + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || bundle.read_bytes(&route))
        .await
        .map_err(|e| ResourceError::TaskFailed(e.to_string()))?
}

/// Read a resource as UTF-8 text on the blocking thread pool.
pub async fn read_text_async<B>(bundle: Arc<B>, route: Route) -> Result<String, ResourceError>
where
    B: ResourceBundle + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || bundle.read_text(&route))
        .await
        .map_err(|e| ResourceError::TaskFailed(e.to_string()))?
}
