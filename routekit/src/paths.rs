//! Rendering routes as Unix-style filesystem paths.
//!
//! Segment names are written verbatim (no escaping) and up-steps as `..`.
//! Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use crate::route::{Node, Route, BACK_TOKEN, CURRENT_TOKEN, SEPARATOR};

/// Render a route relative to the current directory.
///
/// # Examples
///
/// ```
/// use routekit::paths::to_local_unix_path;
/// use routekit::route::Route;
///
/// assert_eq!(to_local_unix_path(&Route::parse("dir/nested-dir/file.ext")), "./dir/nested-dir/file.ext");
/// assert_eq!(to_local_unix_path(&Route::root()), ".");
/// ```
pub fn to_local_unix_path(route: &Route) -> String {
    let mut path = String::with_capacity(128);
    path.push_str(CURRENT_TOKEN);
    push_nodes(&mut path, route);
    path
}

/// Render a route as an absolute path.
///
/// # Examples
///
/// ```
/// use routekit::paths::to_full_unix_path;
/// use routekit::route::Route;
///
/// assert_eq!(to_full_unix_path(&Route::parse("dir/nested-dir/file.ext")), "/dir/nested-dir/file.ext");
/// assert_eq!(to_full_unix_path(&Route::root()), "/");
/// ```
pub fn to_full_unix_path(route: &Route) -> String {
    if route.is_root() {
        return SEPARATOR.to_string();
    }
    let mut path = String::with_capacity(128);
    push_nodes(&mut path, route);
    path
}

/// Resolve a route against a base directory.
///
/// Up-steps are pushed as `..` components; they are not collapsed against
/// `base`.
pub fn to_path_buf(base: impl AsRef<Path>, route: &Route) -> PathBuf {
    let mut path = base.as_ref().to_path_buf();
    for node in route {
        path.push(node_text(node));
    }
    path
}

fn push_nodes(path: &mut String, route: &Route) {
    for node in route {
        path.push(SEPARATOR);
        path.push_str(node_text(node));
    }
}

fn node_text(node: &Node) -> &str {
    match node {
        Node::Common(segment) => segment.as_str(),
        Node::Back => BACK_TOKEN,
        Node::Current => CURRENT_TOKEN,
    }
}
