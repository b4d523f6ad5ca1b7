//! HEXGAME Core - Board engine
//!
//! This crate provides the core game logic for Hex:
//! - Board geometry (skewed N x N grid with edge sentinels)
//! - Cell ownership and move legality
//! - Connectivity search and win detection

pub mod board;
pub mod connect;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Edge, Player, MAX_NEIGHBORS, NEIGHBOR_OFFSETS};
pub use error::HexError;
