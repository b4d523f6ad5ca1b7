//! Integration tests for the Hex engine
//!
//! Tests the full stack: board, connectivity, search, and the game controller

use hexgame_core::{Board, Edge, Player, MAX_NEIGHBORS};
use hexgame_mcts::{choose_move, MctsConfig, MctsPlayer};
use hexgame_play::{play_match, GameConfig, GameController, GameOutcome, Phase, ScriptedIo};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Fill a board with alternating random moves, White first
fn random_full_board(size: usize, rng: &mut ChaCha8Rng) -> Board {
    let mut board = Board::new(size).unwrap();
    let mut cells = board.legal_moves();
    cells.shuffle(rng);

    let mut side = Player::White;
    for cell in cells {
        assert!(board.place(cell.x, cell.y, side));
        side = side.opponent();
    }
    board
}

/// Every coordinate in row-major order
fn all_coordinates(size: i32) -> Vec<String> {
    (0..size)
        .flat_map(|x| (0..size).map(move |y| format!("{} {}", x, y)))
        .collect()
}

// ============================================================================
// BOARD
// ============================================================================

#[test]
fn test_board_invariants_across_sizes() {
    for size in 1..=9 {
        let board = Board::new(size).unwrap();
        assert_eq!(board.legal_moves().len(), size * size);

        for cell in board.legal_moves() {
            assert_eq!(board.cell_at(cell.x, cell.y).unwrap(), cell);

            let neighbors = board.neighbors_of(&cell, None);
            assert!(neighbors.len() <= MAX_NEIGHBORS);
            for n in neighbors {
                let on_board = board.cell_at(n.x, n.y).is_ok();
                let sentinel = Edge::ALL.iter().any(|&e| board.sentinel(e) == n);
                assert!(on_board ^ sentinel);
            }
        }
    }
}

#[test]
fn test_random_placements_shrink_legal_moves() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut board = Board::new(6).unwrap();
    let mut side = Player::White;

    for _ in 0..200 {
        let x = rand::Rng::gen_range(&mut rng, -1..7);
        let y = rand::Rng::gen_range(&mut rng, -1..7);
        let before = board.legal_moves().len();
        let round = board.round();

        if board.place(x, y, side) {
            assert_eq!(board.legal_moves().len(), before - 1);
            assert_eq!(board.round(), round + 1);
            side = side.opponent();
        } else {
            assert_eq!(board.legal_moves().len(), before);
            assert_eq!(board.round(), round);
        }
    }
}

// ============================================================================
// CONNECTIVITY
// ============================================================================

#[test]
fn test_size_two_scenario() {
    let mut board = Board::new(2).unwrap();
    assert!(board.place(0, 0, Player::White));
    assert!(board.place(1, 0, Player::White));
    assert!(board.has_connection(Edge::North, Edge::South, Player::White));
}

#[test]
fn test_full_boards_have_exactly_one_winner() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for size in 1..=8 {
        for _ in 0..20 {
            let board = random_full_board(size, &mut rng);
            let white = board.has_connection(Edge::North, Edge::South, Player::White);
            let black = board.has_connection(Edge::West, Edge::East, Player::Black);
            assert!(white ^ black, "size {} produced white={} black={}\n{}", size, white, black, board);
        }
    }
}

#[test]
fn test_undo_restores_position() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let board = random_full_board(5, &mut rng);
    let winner = board.winner();

    let mut copy = board.clone();
    let cell = copy.cell_at(2, 2).unwrap();
    copy.undo(2, 2);
    assert_eq!(copy.legal_moves().len(), 1);
    assert!(copy.place(2, 2, cell.owner.unwrap()));
    assert_eq!(copy.winner(), winner);
    assert_eq!(copy.round(), board.round());
}

// ============================================================================
// SEARCH
// ============================================================================

#[test]
fn test_choose_move_single_candidate() {
    let mut board = Board::new(3).unwrap();
    let mut side = Player::White;
    for cell in board.legal_moves().into_iter().take(8) {
        board.place(cell.x, cell.y, side);
        side = side.opponent();
    }
    assert_eq!(board.legal_moves().len(), 1);

    let cell = choose_move(&board, side, side.opponent(), 1).unwrap();
    assert_eq!((cell.x, cell.y), (2, 2));
}

#[test]
fn test_seeded_players_agree() {
    let mut board = Board::new(5).unwrap();
    board.place(2, 2, Player::White);
    board.place(1, 3, Player::Black);

    let config = MctsConfig::with_simulations(20).with_seed(31);
    let first = MctsPlayer::new(config.clone()).choose_move(&board, Player::White).unwrap();
    let second = MctsPlayer::new(config.sequential()).choose_move(&board, Player::White).unwrap();

    assert_eq!(first, second);
    assert!(first.is_empty());
}

// ============================================================================
// GAME FLOW
// ============================================================================

#[test]
fn test_interactive_game_completes() {
    for side in ["white", "Black"] {
        let mut inputs = vec![side.to_string(), "no".to_string()];
        inputs.extend(all_coordinates(4));

        let config = GameConfig::new(4).with_ai(MctsConfig::with_simulations(10).with_seed(5));
        let mut game = GameController::new(config, ScriptedIo::new(inputs)).unwrap();

        let outcome = game.run().unwrap();
        let GameOutcome::Winner(winner) = outcome else {
            panic!("game should have a winner");
        };
        assert_eq!(game.phase(), Phase::GameOver(outcome));
        assert_eq!(game.board().winner(), Some(winner));
        assert!(game.io().transcript().contains(&format!("{} ({}) wins!", winner, winner.symbol())));
    }
}

#[test]
fn test_selfplay_match() {
    let config = MctsConfig::with_simulations(5).with_seed(12);
    let results = play_match(4, 6, &config, true).unwrap();

    assert_eq!(results.games_played, 6);
    assert_eq!(results.white_wins + results.black_wins, 6);
    assert_eq!(results.aborted, 0);
    for game in &results.games {
        assert!(game.rounds >= 7);
        assert!(game.rounds <= 16);
    }
}

#[test]
fn test_player_plays_out_full_game() {
    let player = MctsPlayer::new(MctsConfig::with_simulations(4).with_seed(3));
    let mut board = Board::new(5).unwrap();
    let mut side = Player::White;

    while board.check_winner().is_none() {
        let cell = player.choose_move(&board, side).unwrap();
        assert!(board.place(cell.x, cell.y, side));
        side = side.opponent();
    }
    assert!(board.winner().is_some());
}
