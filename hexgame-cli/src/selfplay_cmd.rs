//! Selfplay command - computer vs computer match
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use clap::Args;

use hexgame_mcts::{MctsConfig, DEFAULT_SIMULATIONS};
use hexgame_play::{play_match, GameOutcome, MatchResult, DEFAULT_BOARD_SIZE};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Board size (cells per edge)
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub size: usize,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Random playouts per candidate move
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS)]
    pub simulations: u32,

    /// Base seed; each game derives its own seeds from it
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play games concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run selfplay command
pub fn run(args: SelfplayArgs) -> Result<()> {
    let mut config = MctsConfig::with_simulations(args.simulations);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    tracing::info!(
        "Starting selfplay: {} games on {}x{} ({} simulations)",
        args.games,
        args.size,
        args.size,
        args.simulations
    );

    let results = play_match(args.size, args.games, &config, args.parallel)
        .with_context(|| format!("Cannot play on a board of size {}", args.size))?;

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_results(results: &MatchResult, json: bool) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(results).context("Failed to encode results")?;
        println!("{}", output);
    } else {
        print!("{}", format_text_results(results));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn format_text_results(results: &MatchResult) -> String {
    let mut out = String::new();
    out.push_str("\n=== Selfplay Results ===\n");
    out.push_str(&format!("Total games: {}\n", results.games_played));
    out.push_str(&format!(
        "White wins:  {} ({:.1}%)\n",
        results.white_wins,
        results.white_win_rate() * 100.0
    ));
    out.push_str(&format!(
        "Black wins:  {} ({:.1}%)\n",
        results.black_wins,
        results.black_win_rate() * 100.0
    ));
    if results.aborted > 0 {
        out.push_str(&format!("Aborted:     {}\n", results.aborted));
    }
    out.push_str(&format!("Avg stones:  {:.1}\n", results.avg_rounds));

    out.push_str("\nGame details:\n");
    for game in &results.games {
        let outcome = match game.outcome {
            GameOutcome::Winner(winner) => format!("{} wins", winner),
            GameOutcome::Aborted => "aborted".to_string(),
        };
        out.push_str(&format!(
            "  Game {}: {} after {} stones\n",
            game.game_number, outcome, game.rounds
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexgame_core::Player;
    use hexgame_play::GameRecord;

    #[test]
    fn test_format_text_results() {
        let results = MatchResult::from_games(vec![
            GameRecord {
                game_number: 1,
                outcome: GameOutcome::Winner(Player::White),
                rounds: 9,
                moves: vec![],
            },
            GameRecord {
                game_number: 2,
                outcome: GameOutcome::Winner(Player::Black),
                rounds: 11,
                moves: vec![],
            },
        ]);

        let text = format_text_results(&results);
        assert!(text.contains("Total games: 2"));
        assert!(text.contains("White wins:  1 (50.0%)"));
        assert!(text.contains("Game 2: Black wins after 11 stones"));
        assert!(!text.contains("Aborted"));
    }

    #[test]
    fn test_json_results_shape() {
        let results = MatchResult::from_games(vec![GameRecord {
            game_number: 1,
            outcome: GameOutcome::Winner(Player::White),
            rounds: 1,
            moves: vec![hexgame_core::Cell::new(0, 0, Some(Player::White))],
        }]);

        let value = serde_json::to_value(&results).unwrap();
        assert_eq!(value["white_wins"], 1);
        assert_eq!(value["games"][0]["outcome"]["Winner"], "White");
        assert_eq!(value["games"][0]["moves"][0]["owner"], "White");
    }
}
