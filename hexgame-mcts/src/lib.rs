//! HEXGAME MCTS - Monte-Carlo move selection
//!
//! This crate provides the computer opponent:
//! - Uniformly random playouts on cloned boards
//! - Flat Monte-Carlo scoring of every legal move
//! - Optional rayon parallelism across candidates (`parallel` feature)

pub mod config;
pub mod rollout;
pub mod search;

use hexgame_core::{Board, Cell, Player};
use thiserror::Error;

pub use config::{MctsConfig, DEFAULT_SIMULATIONS};
pub use rollout::{random_playout, RolloutResult};
pub use search::{choose_move, run_search, MoveStatistics, SearchResult};

/// Search failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The board has no empty cell left to play
    #[error("no legal move available")]
    NoLegalMove,
}

/// Monte-Carlo player
#[derive(Clone, Debug, Default)]
pub struct MctsPlayer {
    config: MctsConfig,
}

impl MctsPlayer {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Full search statistics for `player` to move
    pub fn search(&self, board: &Board, player: Player) -> Result<SearchResult, SearchError> {
        run_search(board, player, player.opponent(), &self.config)
    }

    /// Best move for `player`
    pub fn choose_move(&self, board: &Board, player: Player) -> Result<Cell, SearchError> {
        self.search(board, player).map(|result| result.best)
    }
}
