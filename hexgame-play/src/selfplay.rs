//! Computer vs computer games
//!
//! Level 2/3 - Match and single-game play

use hexgame_core::{Board, Cell, HexError, Player};
use hexgame_mcts::{MctsConfig, MctsPlayer, SearchError};
use rayon::prelude::*;
use serde::Serialize;

use crate::controller::GameOutcome;

/// Record of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub outcome: GameOutcome,
    /// Stones placed
    pub rounds: u32,
    /// Moves in order, each tagged with the side that played it
    pub moves: Vec<Cell>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Aborted => None,
        }
    }
}

/// Plays games between two configured computer players
pub struct GameRunner {
    white: MctsPlayer,
    black: MctsPlayer,
}

impl GameRunner {
    pub fn new(white: MctsConfig, black: MctsConfig) -> Self {
        Self {
            white: MctsPlayer::new(white),
            black: MctsPlayer::new(black),
        }
    }

    /// Both sides use the same settings
    pub fn symmetric(config: MctsConfig) -> Self {
        Self::new(config.clone(), config)
    }

    fn player(&self, side: Player) -> &MctsPlayer {
        match side {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    /// Play one game on an empty board, White first
    pub fn play_game(&self, size: usize, game_number: usize) -> Result<GameRecord, HexError> {
        let mut board = Board::new(size)?;
        let mut moves = Vec::with_capacity(board.cell_count());
        let mut side = Player::White;

        let outcome = loop {
            if let Some(winner) = board.check_winner() {
                break GameOutcome::Winner(winner);
            }

            let cell = match self.player(side).choose_move(&board, side) {
                Ok(cell) => cell,
                Err(SearchError::NoLegalMove) => break GameOutcome::Aborted,
            };
            if !board.place(cell.x, cell.y, side) {
                break GameOutcome::Aborted;
            }
            moves.push(Cell::new(cell.x, cell.y, Some(side)));
            side = side.opponent();
        };

        tracing::info!(game = game_number, ?outcome, rounds = board.round(), "self-play game finished");

        Ok(GameRecord {
            game_number,
            outcome,
            rounds: board.round(),
            moves,
        })
    }
}

/// Result of a match (multiple games)
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult {
    pub white_wins: u32,
    pub black_wins: u32,
    /// Games that ended without a winner
    pub aborted: u32,
    /// Average stones per game
    pub avg_rounds: f32,
    pub games_played: u32,
    pub games: Vec<GameRecord>,
}

impl MatchResult {
    /// Aggregate individual games
    pub fn from_games(games: Vec<GameRecord>) -> Self {
        let count_winner = |side| games.iter().filter(|g| g.winner() == Some(side)).count() as u32;
        let white_wins = count_winner(Player::White);
        let black_wins = count_winner(Player::Black);
        let games_played = games.len() as u32;

        let total_rounds: u32 = games.iter().map(|g| g.rounds).sum();
        let avg_rounds = if games.is_empty() {
            0.0
        } else {
            total_rounds as f32 / games.len() as f32
        };

        Self {
            white_wins,
            black_wins,
            aborted: games_played - white_wins - black_wins,
            avg_rounds,
            games_played,
            games,
        }
    }

    pub fn white_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.white_wins as f32 / self.games_played as f32
        }
    }

    pub fn black_win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.black_wins as f32 / self.games_played as f32
        }
    }
}

/// Play `games` games on a `size` board
///
/// With a seed in `config`, game `i` seeds White with `seed + 2i` and Black
/// with `seed + 2i + 1`, so a match replays identically.
pub fn play_match(
    size: usize,
    games: usize,
    config: &MctsConfig,
    parallel: bool,
) -> Result<MatchResult, HexError> {
    // Reject a bad size once instead of once per game
    Board::new(size)?;

    let play = |i: usize| {
        let (white, black) = game_configs(config, i);
        GameRunner::new(white, black).play_game(size, i + 1)
    };

    let records = if parallel {
        (0..games).into_par_iter().map(play).collect::<Result<Vec<_>, _>>()?
    } else {
        (0..games).map(play).collect::<Result<Vec<_>, _>>()?
    };

    Ok(MatchResult::from_games(records))
}

fn game_configs(config: &MctsConfig, game: usize) -> (MctsConfig, MctsConfig) {
    match config.seed {
        Some(seed) => {
            let base = seed.wrapping_add(2 * game as u64);
            (
                config.clone().with_seed(base),
                config.clone().with_seed(base.wrapping_add(1)),
            )
        }
        None => (config.clone(), config.clone()),
    }
}
