//! docsite CLI - documentation site configuration composer.
//!
//! Provides commands for:
//! - `check`: Validate `docsite.toml` against the project files
//! - `dump`: Print the composed site descriptor as JSON
//! - `sidebar`: Print the sidebar navigation tree

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DumpArgs, SidebarArgs};
use output::Output;

/// docsite - documentation site configuration composer.
#[derive(Parser)]
#[command(name = "docsite", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site declarations and report every defect.
    Check(CheckArgs),
    /// Print the composed site descriptor as JSON.
    Dump(DumpArgs),
    /// Print the sidebar navigation tree.
    Sidebar(SidebarArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Check(args) => args.project.verbose,
            Self::Dump(args) => args.project.verbose,
            Self::Sidebar(args) => args.project.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Dump(args) => args.execute(),
        Commands::Sidebar(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
