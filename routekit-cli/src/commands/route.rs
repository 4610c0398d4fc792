//! Route manipulation commands: normalize, concat, parent, escape, inspect.
//!
//! Commands write to any `Write` so they can be exercised in tests.

use std::io::Write;

use routekit::paths::{to_full_unix_path, to_local_unix_path};
use routekit::{Node, Route};
use serde_json::json;

use crate::error::CliError;

fn output_error(e: impl std::fmt::Display) -> CliError {
    CliError::Output(e.to_string())
}

/// Print the canonical form of each route, one per line.
pub fn normalize(routes: &[String], out: &mut impl Write) -> Result<(), CliError> {
    for text in routes {
        let route = Route::parse(text);
        tracing::debug!(input = %text, normalized = %route, "Normalized route");
        writeln!(out, "{}", route).map_err(output_error)?;
    }
    Ok(())
}

/// Concatenate routes left to right and print the result.
pub fn concat(routes: &[String], out: &mut impl Write) -> Result<(), CliError> {
    let route = routes
        .iter()
        .map(|text| Route::parse(text))
        .fold(Route::root(), |acc, next| acc + next);
    writeln!(out, "{}", route).map_err(output_error)
}

/// Print the route `levels` steps up.
pub fn parent(route: &str, levels: usize, out: &mut impl Write) -> Result<(), CliError> {
    let route = Route::parse(route).ancestor(levels);
    writeln!(out, "{}", route).map_err(output_error)
}

/// Build a route from literal names and print its escaped form.
pub fn escape(names: &[String], out: &mut impl Write) -> Result<(), CliError> {
    let route = Route::from_names(names.iter().cloned())?;
    writeln!(out, "{}", route).map_err(output_error)
}

/// Print the steps and derived properties of a route.
pub fn inspect(route: &str, as_json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let route = Route::parse(route);

    if as_json {
        let nodes: Vec<serde_json::Value> = route
            .iter()
            .map(|node| match node {
                Node::Common(segment) => json!({ "common": segment.as_str() }),
                Node::Back => json!("back"),
                Node::Current => json!("current"),
            })
            .collect();
        let report = json!({
            "route": route,
            "nodes": nodes,
            "is_root": route.is_root(),
            "is_local": route.is_local(),
            "local_path": to_local_unix_path(&route),
            "full_path": to_full_unix_path(&route),
        });
        let text = serde_json::to_string_pretty(&report).map_err(output_error)?;
        return writeln!(out, "{}", text).map_err(output_error);
    }

    writeln!(out, "Route:      {}", route).map_err(output_error)?;
    writeln!(out, "Root:       {}", route.is_root()).map_err(output_error)?;
    writeln!(out, "Local:      {}", route.is_local()).map_err(output_error)?;
    writeln!(out, "Local path: {}", to_local_unix_path(&route)).map_err(output_error)?;
    writeln!(out, "Full path:  {}", to_full_unix_path(&route)).map_err(output_error)?;
    writeln!(out, "Nodes:      {}", route.len()).map_err(output_error)?;
    for (i, node) in route.iter().enumerate() {
        let description = match node {
            Node::Common(segment) => format!("common {:?}", segment.as_str()),
            Node::Back => "back".to_string(),
            Node::Current => "current".to_string(),
        };
        writeln!(out, "  [{}] {}", i, description).map_err(output_error)?;
    }
    Ok(())
}
