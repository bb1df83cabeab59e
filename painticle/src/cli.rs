//! Root CLI structure for painticle

use clap::{Parser, Subcommand};

use crate::commands::closest::ClosestArgs;
use crate::commands::grid::GridArgs;
use crate::commands::simulate::SimulateArgs;

#[derive(Parser)]
#[command(name = "painticle")]
#[command(about = "Drive the PAINTicle acceleration core on generated scenes", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Number of worker threads (0 picks one per core)
    #[arg(short = 'j', long, default_value_t = 0, global = true)]
    pub threads: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Spawn, age and re-index particles on a generated mesh
    Simulate(SimulateArgs),

    /// Build a hashed grid from random points and report bucket statistics
    Grid(GridArgs),

    /// Find the closest surface point on a generated mesh
    Closest(ClosestArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
