//! Read a resource from a directory bundle.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use routekit::config::ConfigFile;
use routekit::resource::{read_bytes_async, resource_identifier, ResourceBundle};
use routekit::Route;

use super::common::resolve_bundle;
use crate::error::CliError;

/// Arguments for `routekit read`.
#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Route of the resource inside the bundle (must be local)
    pub route: String,

    /// Bundle directory (overrides resources.directory)
    #[arg(long)]
    pub bundle_dir: Option<PathBuf>,

    /// Bundle name (overrides resources.base_name)
    #[arg(long)]
    pub base_name: Option<String>,

    /// Only print the resource identifier, without reading
    #[arg(long)]
    pub identifier: bool,
}

/// Run the read command.
pub fn run(args: ReadArgs, config: &ConfigFile, out: &mut impl Write) -> Result<(), CliError> {
    let route = Route::parse(&args.route);
    let bundle = resolve_bundle(args.bundle_dir, args.base_name, config)?;

    if args.identifier {
        let identifier = resource_identifier(bundle.name(), &route)?;
        return writeln!(out, "{}", identifier).map_err(|e| CliError::Output(e.to_string()));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;
    let contents = runtime.block_on(read_bytes_async(Arc::new(bundle), route))?;

    out.write_all(&contents)
        .and_then(|_| out.flush())
        .map_err(|e| CliError::Output(e.to_string()))
}
