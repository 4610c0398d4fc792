//! Routekit - platform-agnostic symbolic routes
//!
//! This library provides [`Route`], a normalized relative path made of named
//! segments and up-steps, independent of any concrete filesystem. Routes
//! parse from and format to a `/`-separated text form with escaping, and
//! concatenate with cancellation of `name/..` pairs at the seam.
//!
//! Around the core sit thin adapters:
//!
//! - [`paths`]: render routes as Unix-style filesystem paths
//! - [`resource`]: look up resources in named bundles by local route
//! - [`config`] and [`logging`]: shared setup for applications
//!
//! # Example
//!
//! ```
//! use routekit::Route;
//!
//! let route = Route::parse("./../first/doesn't matter/../second");
//! assert_eq!(route.to_string(), "../first/second");
//! assert!(!route.is_local());
//! assert_eq!(route.parent(), Route::parse("../first"));
//! ```

pub mod config;
pub mod logging;
pub mod paths;
pub mod resource;
pub mod route;

pub use route::{Node, Route, RouteError, Segment};
