//! noughts CLI - Self-learning noughts and crosses
//!
//! This CLI provides:
//! - Self-play training with progress, CSV and JSON summary output
//! - Interactive play against the learner after training
//!
//! Set `RUST_LOG=debug` to see pool materialization and reinforcement.

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Self-learning noughts and crosses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the learner by self-play and report the results
    Train(noughts::cli::commands::train::TrainArgs),

    /// Play against the learner on the terminal
    Play(noughts::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => noughts::cli::commands::train::execute(args),
        Commands::Play(args) => noughts::cli::commands::play::execute(args),
    }
}
