//! Play command - human vs computer on the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), GameController::run()
//! - Level 4: argument defaults

use anyhow::{Context, Result};
use clap::Args;

use hexgame_mcts::{MctsConfig, DEFAULT_SIMULATIONS};
use hexgame_play::{ConsoleIo, GameConfig, GameController, GameOutcome, DEFAULT_BOARD_SIZE};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (cells per edge)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Random playouts per candidate move
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
    pub simulations: u32,

    /// Seed for reproducible computer moves
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the side swap after the opening move
    #[arg(long)]
    pub no_pie: bool,

    /// Score candidate moves on one thread
    #[arg(long)]
    pub sequential: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = build_config(&args);

    tracing::info!(
        "Starting game: size={}, simulations={}, pie_rule={}",
        config.size,
        config.ai.simulations,
        config.pie_rule
    );

    let mut game = GameController::new(config, ConsoleIo)
        .with_context(|| format!("Cannot start a game on a board of size {}", args.size))?;

    match game.run().context("Game interrupted")? {
        GameOutcome::Winner(winner) => tracing::info!("Winner: {}", winner),
        GameOutcome::Aborted => tracing::warn!("Game ended without a winner"),
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs) -> GameConfig {
    let mut ai = MctsConfig::with_simulations(args.simulations);
    if let Some(seed) = args.seed {
        ai = ai.with_seed(seed);
    }
    if args.sequential {
        ai = ai.sequential();
    }

    GameConfig::new(args.size)
        .with_pie_rule(!args.no_pie)
        .with_ai(ai)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config() {
        let args = PlayArgs {
            size: 7,
            simulations: 50,
            seed: Some(3),
            no_pie: true,
            sequential: true,
        };
        let config = build_config(&args);

        assert_eq!(config.size, 7);
        assert!(!config.pie_rule);
        assert_eq!(config.ai.simulations, 50);
        assert_eq!(config.ai.seed, Some(3));
        assert!(!config.ai.parallel);
    }
}
