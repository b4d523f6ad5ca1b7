//! HEXGAME CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the computer
//! - selfplay: Let the computer play itself

mod play_cmd;
mod selfplay_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexgame")]
#[command(about = "Play Hex against a Monte-Carlo opponent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the computer
    Play(play_cmd::PlayArgs),
    /// Run computer vs computer games
    Selfplay(selfplay_cmd::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Selfplay(args) => selfplay_cmd::run(args),
    }
}
