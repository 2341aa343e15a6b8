//! Command-line interface for the tic-tac-toe engine.

use clap::{Parser, Subcommand};

/// Tic-tac-toe - play the engine from a terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe engine with history and a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game on stdin/stdout
    Play {
        /// Path to a TOML engine config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Play X against the computer
        #[arg(long)]
        vs_computer: bool,

        /// Seed for the computer's random moves
        #[arg(long)]
        seed: Option<u64>,

        /// Computer delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}
