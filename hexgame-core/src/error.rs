//! Error types for board construction and lookups

use thiserror::Error;

/// Errors raised by the board
///
/// An illegal placement is deliberately not an error: `Board::place`
/// reports it as `false` because search probes illegal moves constantly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("invalid board size {size}: must be between 1 and 46340")]
    InvalidSize { size: usize },

    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("unknown side '{0}': expected 'white' or 'black'")]
    UnknownPlayer(String),
}
