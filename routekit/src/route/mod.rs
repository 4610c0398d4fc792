//! Symbolic routes: normalized sequences of navigation steps.
//!
//! A [`Route`] addresses a resource relative to some reference point without
//! touching any filesystem. It is made of [`Node`]s: named segments, up-steps
//! (`..`) and stay steps (`.`). Every route is kept in canonical form:
//!
//! - no `.` steps,
//! - no `..` directly after a named segment (the pair cancels),
//! - so any `..` steps form a prefix, followed only by named segments.
//!
//! # Text format
//!
//! ```text
//! ../assets/icons/\..      up one level, then assets, icons and a file named ".."
//! ```
//!
//! Segments are separated by `/`. A backslash escapes the next character.
//! Formatting escapes backslashes and names that collide with `.` or `..`.
//! The root route formats as `.`.
//!
//! # Example
//!
//! ```
//! use routekit::route::Route;
//!
//! let base = Route::parse("first/second");
//! let relative = Route::parse("../third");
//!
//! assert_eq!(base.concat(&relative), Route::parse("first/third"));
//! assert_eq!(Route::parse("x/../y").to_string(), "y");
//! assert!(Route::parse("x/../y").is_local());
//! ```

mod error;
pub mod escape;
pub mod hash;
mod node;
mod types;

pub use error::RouteError;
pub use node::{Node, Segment};
pub use types::Route;

/// Separator between segments in the text format.
pub const SEPARATOR: char = '/';

/// Text of a stay step.
pub const CURRENT_TOKEN: &str = ".";

/// Text of an up-step.
pub const BACK_TOKEN: &str = "..";
