//! Command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto `TodoApiClient` operations.
//! - Print every response envelope as JSON; failed envelopes exit non-zero.

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod settings;

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();
    let settings = settings::Settings::from_env(&cli)?;
    commands::run_command(cli.command, &settings)
}
