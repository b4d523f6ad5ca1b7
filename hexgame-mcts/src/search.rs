//! Flat Monte-Carlo move selection
//!
//! Every legal move gets the same number of random playouts. A playout
//! scores +1 when the acting player wins and -1 otherwise; the move with the
//! strictly highest total is chosen, ties going to the earliest candidate in
//! row-major order.
//!
//! ## Architecture
//! - Level 2: Search coordination (`run_search`)
//! - Level 3: Per-candidate scoring
//! - Level 4: Selection utilities

use hexgame_core::{Board, Cell, Player};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::MctsConfig;
use crate::rollout::random_playout;
use crate::SearchError;

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// Statistics for a single candidate move
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveStatistics {
    pub cell: Cell,
    /// Wins minus losses over all playouts
    pub score: i64,
    pub wins: u32,
    pub playouts: u32,
}

impl MoveStatistics {
    fn new(cell: Cell) -> Self {
        Self {
            cell,
            score: 0,
            wins: 0,
            playouts: 0,
        }
    }

    pub fn win_rate(&self) -> f32 {
        if self.playouts == 0 {
            0.0
        } else {
            self.wins as f32 / self.playouts as f32
        }
    }
}

/// Result of a search
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Selected move
    pub best: Cell,
    /// Total playouts run
    pub total_simulations: u64,
    /// Statistics per candidate, in `legal_moves()` order
    pub move_stats: Vec<MoveStatistics>,
}

impl SearchResult {
    pub fn best_move(&self) -> Cell {
        self.best
    }

    /// Candidates sorted by score, best first (stable for equal scores)
    pub fn moves_by_score(&self) -> Vec<(Cell, i64)> {
        let mut moves: Vec<_> = self.move_stats.iter().map(|s| (s.cell, s.score)).collect();
        moves.sort_by(|a, b| b.1.cmp(&a.1));
        moves
    }
}

// ============================================================================
// SEARCH (Level 2 - Coordination)
// ============================================================================

/// Score every legal move for `acting` and pick the best
///
/// The board is only read; each playout works on its own clone.
pub fn run_search(
    board: &Board,
    acting: Player,
    opponent: Player,
    config: &MctsConfig,
) -> Result<SearchResult, SearchError> {
    debug_assert_ne!(acting, opponent);

    let candidates = board.legal_moves();
    if candidates.is_empty() {
        return Err(SearchError::NoLegalMove);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let move_stats = score_candidates(board, &candidates, acting, opponent, config, seed);
    let best = select_best(&move_stats).ok_or(SearchError::NoLegalMove)?;

    tracing::debug!(
        player = %acting,
        candidates = candidates.len(),
        simulations = config.simulations,
        best = %best.cell,
        score = best.score,
        "search complete"
    );

    Ok(SearchResult {
        best: best.cell,
        total_simulations: candidates.len() as u64 * config.simulations as u64,
        move_stats,
    })
}

/// Pick a move for `acting` with `simulation_count` playouts per candidate
pub fn choose_move(
    board: &Board,
    acting: Player,
    opponent: Player,
    simulation_count: u32,
) -> Result<Cell, SearchError> {
    let config = MctsConfig::with_simulations(simulation_count);
    run_search(board, acting, opponent, &config).map(|result| result.best)
}

// ============================================================================
// SCORING (Level 3 - Candidates)
// ============================================================================

/// Score all candidates, candidate `i` seeded with `seed + i`
///
/// Seeding per candidate keeps results identical whether candidates run
/// sequentially or on the rayon pool.
fn score_candidates(
    board: &Board,
    candidates: &[Cell],
    acting: Player,
    opponent: Player,
    config: &MctsConfig,
    seed: u64,
) -> Vec<MoveStatistics> {
    let score = |(i, &cell): (usize, &Cell)| {
        score_candidate(
            board,
            cell,
            acting,
            opponent,
            config.simulations,
            seed.wrapping_add(i as u64),
        )
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.parallel {
            return candidates.par_iter().enumerate().map(score).collect();
        }
    }

    candidates.iter().enumerate().map(score).collect()
}

/// Run all playouts for one candidate
fn score_candidate(
    board: &Board,
    cell: Cell,
    acting: Player,
    opponent: Player,
    simulations: u32,
    seed: u64,
) -> MoveStatistics {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut stats = MoveStatistics::new(cell);

    for _ in 0..simulations {
        let mut sim = board.clone();
        sim.place(cell.x, cell.y, acting);

        let result = random_playout(sim, opponent, &mut rng);
        stats.playouts += 1;
        if result.winner == Some(acting) {
            stats.wins += 1;
            stats.score += 1;
        } else {
            stats.score -= 1;
        }
    }

    stats
}

// ============================================================================
// SELECTION (Level 4 - Utilities)
// ============================================================================

/// Strictly greatest score, first candidate wins ties
fn select_best(stats: &[MoveStatistics]) -> Option<&MoveStatistics> {
    stats.iter().fold(None, |best, candidate| match best {
        Some(current) if current.score >= candidate.score => Some(current),
        _ => Some(candidate),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(x: i32, y: i32, score: i64) -> MoveStatistics {
        MoveStatistics {
            cell: Cell::new(x, y, None),
            score,
            wins: 0,
            playouts: 0,
        }
    }

    #[test]
    fn test_select_best_prefers_first_on_tie() {
        let all = vec![stats(0, 0, 3), stats(0, 1, 5), stats(1, 0, 5), stats(1, 1, -2)];
        let best = select_best(&all).unwrap();
        assert_eq!(best.cell, Cell::new(0, 1, None));
    }

    #[test]
    fn test_select_best_empty() {
        assert!(select_best(&[]).is_none());
    }

    #[test]
    fn test_single_legal_move() {
        let mut board = Board::new(2).unwrap();
        board.place(0, 0, Player::Black);
        board.place(0, 1, Player::White);
        board.place(1, 1, Player::Black);

        let cell = choose_move(&board, Player::White, Player::Black, 1).unwrap();
        assert_eq!((cell.x, cell.y), (1, 0));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new(1).unwrap();
        board.place(0, 0, Player::White);

        let err = choose_move(&board, Player::Black, Player::White, 10).unwrap_err();
        assert_eq!(err, SearchError::NoLegalMove);
    }

    #[test]
    fn test_zero_simulations_picks_first() {
        let board = Board::new(3).unwrap();
        let cell = choose_move(&board, Player::White, Player::Black, 0).unwrap();
        assert_eq!((cell.x, cell.y), (0, 0));
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let mut board = Board::new(3).unwrap();
        board.place(1, 1, Player::White);
        let before = board.legal_moves();

        let config = MctsConfig::with_simulations(20).with_seed(3);
        run_search(&board, Player::Black, Player::White, &config).unwrap();

        assert_eq!(board.legal_moves(), before);
        assert_eq!(board.round(), 1);
    }

    #[test]
    fn test_search_statistics() {
        let board = Board::new(3).unwrap();
        let config = MctsConfig::with_simulations(10).with_seed(11);
        let result = run_search(&board, Player::White, Player::Black, &config).unwrap();

        assert_eq!(result.move_stats.len(), 9);
        assert_eq!(result.total_simulations, 90);
        for s in &result.move_stats {
            assert_eq!(s.playouts, 10);
            assert_eq!(s.score, 2 * s.wins as i64 - 10);
        }

        let ranked = result.moves_by_score();
        assert_eq!(ranked.len(), 9);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
        let top = ranked[0].1;
        let first_top = result.move_stats.iter().find(|s| s.score == top).unwrap();
        assert_eq!(result.best_move(), first_top.cell);
    }

    #[test]
    fn test_search_reproducible_for_seed() {
        let mut board = Board::new(4).unwrap();
        board.place(0, 0, Player::White);
        board.place(3, 3, Player::Black);

        let config = MctsConfig::with_simulations(15).with_seed(1234);
        let a = run_search(&board, Player::White, Player::Black, &config).unwrap();
        let b = run_search(&board, Player::White, Player::Black, &config.clone().sequential()).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.move_stats, b.move_stats);
    }

    #[test]
    fn test_takes_immediate_win() {
        // White needs only (1, 1) to finish column 1 on a 3x3 board
        let mut board = Board::new(3).unwrap();
        board.place(0, 1, Player::White);
        board.place(2, 1, Player::White);
        board.place(0, 0, Player::Black);
        board.place(2, 2, Player::Black);

        let config = MctsConfig::with_simulations(50).with_seed(5);
        let result = run_search(&board, Player::White, Player::Black, &config).unwrap();
        let winning = result.move_stats.iter().find(|s| (s.cell.x, s.cell.y) == (1, 1)).unwrap();
        assert_eq!(winning.wins, 50);
        assert_eq!(winning.score, 50);

        // Other moves may also force the win; the chosen one must score as well
        let best = result.move_stats.iter().find(|s| s.cell == result.best).unwrap();
        assert_eq!(best.score, 50);
        assert!(result.move_stats.iter().all(|s| s.score <= best.score));
    }
}
