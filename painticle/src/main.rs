//! Main entry point for the painticle CLI

mod cli;
mod commands;
mod scene;
mod utils;

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap::Parser;
use clap_complete::{Generator, generate};
use painticle_utils::ParallelOptions;
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set verbosity
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if cli.quiet {
        log::set_max_level(log::LevelFilter::Error);
    }

    ParallelOptions::new(cli.threads)
        .configure_global()
        .context("Failed to set up worker threads")?;

    // Execute command
    match cli.command {
        Commands::Simulate(args) => commands::simulate::execute(&args, cli.quiet),
        Commands::Grid(args) => commands::grid::execute(&args),
        Commands::Closest(args) => commands::closest::execute(&args),
        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
