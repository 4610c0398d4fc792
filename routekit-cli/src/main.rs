//! Routekit CLI - Command-line interface
//!
//! This binary provides a command-line interface to the routekit library:
//! normalizing, combining and inspecting routes, and reading resources from
//! a directory bundle.

mod commands;
mod error;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use routekit::logging;

use commands::config::ConfigCommands;
use commands::read::ReadArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "routekit", version, about = "Normalize, combine and resolve symbolic routes")]
struct Cli {
    /// Configuration file (defaults to ~/.routekit/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the canonical form of each route
    Normalize {
        #[arg(required = true)]
        routes: Vec<String>,
    },

    /// Concatenate routes left to right, cancelling `name/..` pairs
    Concat {
        #[arg(required = true)]
        routes: Vec<String>,
    },

    /// Print the route one or more levels up
    Parent {
        route: String,

        /// Number of levels to go up
        #[arg(short, long, default_value_t = 1)]
        levels: usize,
    },

    /// Build a route from literal segment names and print it escaped
    Escape {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Show the steps and properties of a route
    Inspect {
        route: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Read a resource from a directory bundle to stdout
    Read(ReadArgs),

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = commands::common::resolve_config_path(cli.config.as_deref());
    let config = commands::common::load_config(&config_path)?;

    let logging_config = if cli.verbose {
        config.logging.clone().with_level("debug")
    } else {
        config.logging.clone()
    };
    let _log_guard = logging::init(&logging_config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Normalize { routes } => commands::route::normalize(&routes, &mut out),
        Commands::Concat { routes } => commands::route::concat(&routes, &mut out),
        Commands::Parent { route, levels } => commands::route::parent(&route, levels, &mut out),
        Commands::Escape { names } => commands::route::escape(&names, &mut out),
        Commands::Inspect { route, json } => commands::route::inspect(&route, json, &mut out),
        Commands::Read(args) => commands::read::run(args, &config, &mut out),
        Commands::Config { command } => commands::config::run(command, &config_path, &mut out),
    }
}
