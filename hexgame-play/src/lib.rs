//! HEXGAME Play - Game flow on top of the board engine
//!
//! This crate provides:
//! - The line-based I/O capability the game talks through
//! - The interactive human vs computer controller
//! - Computer vs computer matches
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: GameController::run, play_match (orchestration)
//! - Level 2: phase transitions, single games
//! - Level 3: turns, swap offers
//! - Level 4: parsing, configuration

pub mod config;
pub mod controller;
pub mod io;
pub mod selfplay;

use hexgame_core::HexError;
use thiserror::Error;

pub use config::{GameConfig, DEFAULT_BOARD_SIZE};
pub use controller::{GameController, GameOutcome, Phase};
pub use io::{ConsoleIo, GameIo, ScriptedIo};
pub use selfplay::{play_match, GameRecord, GameRunner, MatchResult};

/// Errors that end a game early
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("board error: {0}")]
    Board(#[from] HexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
