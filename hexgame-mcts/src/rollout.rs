//! Random playouts
//!
//! A playout takes an owned board and alternates uniformly random legal
//! moves until one side connects.

use hexgame_core::{Board, Player};
use rand::Rng;

/// Result of a playout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolloutResult {
    /// Winner, or None if the board filled up without a connection
    pub winner: Option<Player>,
    /// Number of moves played
    pub moves_played: u32,
}

/// Play random moves on `board` starting with `to_move`
///
/// Drawing and removing a random entry from the remaining legal moves gives
/// the same distribution as re-enumerating `legal_moves()` every ply.
pub fn random_playout<R: Rng>(mut board: Board, to_move: Player, rng: &mut R) -> RolloutResult {
    if let Some(winner) = board.check_winner() {
        return RolloutResult {
            winner: Some(winner),
            moves_played: 0,
        };
    }

    let mut moves = board.legal_moves();
    let mut player = to_move;
    let mut moves_played = 0;

    while !moves.is_empty() {
        let cell = moves.swap_remove(rng.gen_range(0..moves.len()));
        board.place(cell.x, cell.y, player);
        moves_played += 1;

        // Only the side that just moved can have completed a chain
        if board.may_have_winner() && board.is_connected(player) {
            return RolloutResult {
                winner: Some(player),
                moves_played,
            };
        }
        player = player.opponent();
    }

    RolloutResult {
        winner: board.winner(),
        moves_played,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_playout_always_decides() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for size in 1..=7 {
            let board = Board::new(size).unwrap();
            let result = random_playout(board, Player::White, &mut rng);
            assert!(result.winner.is_some());
            assert!(result.moves_played as usize <= size * size);
        }
    }

    #[test]
    fn test_playout_on_won_board() {
        let mut board = Board::new(2).unwrap();
        board.place(0, 1, Player::Black);
        board.place(1, 0, Player::White);
        board.place(1, 1, Player::Black);
        board.place(0, 0, Player::White);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = random_playout(board, Player::Black, &mut rng);
        assert_eq!(result.winner, Some(Player::White));
        assert_eq!(result.moves_played, 0);
    }

    #[test]
    fn test_playout_deterministic_for_seed() {
        let board = Board::new(5).unwrap();
        let a = random_playout(board.clone(), Player::White, &mut ChaCha8Rng::seed_from_u64(9));
        let b = random_playout(board.clone(), Player::White, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(board.round(), 0);
    }
}
