//! Madastyle CLI
//!
//! Materializes bundled and remote configuration resources as local files.

mod cli;
mod commands;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Resource { logical_path } => commands::resource::run_resource(cli, logical_path),
        Commands::ConfigPath { location } => commands::config_path::run_config_path(cli, location),
        Commands::Checksums => commands::checksums::run_checksums(),
        Commands::Digest { algorithm, files } => commands::digest::run_digest(*algorithm, files),
    }
}
