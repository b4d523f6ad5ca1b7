//! Interactive game between a human and the computer
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - drives phases until the game is over
//! - Level 2: step() - one phase transition
//! - Level 3: select_colour(), offer_swap(), play_turn()
//! - Level 4: input parsing and messages

use std::io;

use hexgame_core::{Board, Cell, Player};
use hexgame_mcts::{MctsPlayer, SearchError};
use serde::Serialize;

use crate::config::GameConfig;
use crate::io::GameIo;
use crate::PlayError;

// ============================================================================
// TYPES
// ============================================================================

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Winner(Player),
    /// Ended without a winner: no legal move was left or input closed
    Aborted,
}

/// Controller state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    ColourSelection,
    /// One-time offer to swap sides after the opening move
    PieSwap,
    Turn(Player),
    GameOver(GameOutcome),
}

/// Drives one game over a `GameIo`
pub struct GameController<I: GameIo> {
    io: I,
    board: Board,
    ai: MctsPlayer,
    pie_rule: bool,
    /// Side the human controls
    human: Player,
    phase: Phase,
}

impl<I: GameIo> GameController<I> {
    /// Create a controller; fails if the board size is invalid
    pub fn new(config: GameConfig, io: I) -> Result<Self, PlayError> {
        let board = Board::new(config.size)?;

        Ok(Self {
            io,
            board,
            ai: MctsPlayer::new(config.ai),
            pie_rule: config.pie_rule,
            human: Player::White,
            phase: Phase::ColourSelection,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn human_side(&self) -> Player {
        self.human
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn into_io(self) -> I {
        self.io
    }

    // ========================================================================
    // LEVEL 1 - ORCHESTRATION
    // ========================================================================

    /// Play until the game is over
    pub fn run(&mut self) -> Result<GameOutcome, PlayError> {
        loop {
            if let Phase::GameOver(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    // ========================================================================
    // LEVEL 2 - TRANSITIONS
    // ========================================================================

    /// Advance by one phase
    ///
    /// End of input ends the game as `GameOutcome::Aborted`; any other I/O
    /// failure is returned.
    pub fn step(&mut self) -> Result<Phase, PlayError> {
        let result = match self.phase {
            Phase::ColourSelection => self.select_colour(),
            Phase::PieSwap => self.offer_swap(),
            Phase::Turn(player) => self.play_turn(player),
            Phase::GameOver(outcome) => Ok(Phase::GameOver(outcome)),
        };

        let next = match result {
            Err(PlayError::Io(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                self.input_closed()
            }
            other => other?,
        };

        if next != self.phase {
            tracing::debug!(from = ?self.phase, to = ?next, round = self.board.round(), "phase change");
        }
        self.phase = next;
        Ok(next)
    }

    // ========================================================================
    // LEVEL 3 - PHASES
    // ========================================================================

    fn select_colour(&mut self) -> Result<Phase, PlayError> {
        self.io.out(
            "Choose your side: white (X, moves first, joins top and bottom) \
             or black (O, joins left and right).",
        );

        self.human = loop {
            match self.io.read_line(Some("Your side: "))?.parse::<Player>() {
                Ok(player) => break player,
                Err(_) => self.io.out("Please enter 'white' or 'black'."),
            }
        };

        let message = format!(
            "You play {} ({}). The computer plays {} ({}).",
            self.human,
            self.human.symbol(),
            self.human.opponent(),
            self.human.opponent().symbol()
        );
        self.io.out(&message);
        tracing::info!(human = %self.human, size = self.board.size(), "game started");

        self.show_board();
        Ok(Phase::Turn(Player::White))
    }

    fn offer_swap(&mut self) -> Result<Phase, PlayError> {
        let second = Player::Black;

        let swap = if second == self.human {
            self.io.out("Pie rule: you may take over White's opening stone.");
            loop {
                match self.io.read_with(Some("Swap sides? (yes/no): "), parse_yes_no)? {
                    Some(answer) => break answer,
                    None => self.io.out("Please answer 'yes' or 'no'."),
                }
            }
        } else {
            ai_wants_swap(&self.board)
        };

        if swap {
            self.human = self.human.opponent();
            let message = format!(
                "Sides swapped. You now play {} ({}).",
                self.human,
                self.human.symbol()
            );
            self.io.out(&message);
            tracing::info!(human = %self.human, "sides swapped");
        } else if second != self.human {
            self.io.out("The computer keeps its side.");
        }

        Ok(Phase::Turn(second))
    }

    fn play_turn(&mut self, player: Player) -> Result<Phase, PlayError> {
        if self.board.is_full() {
            return Ok(self.abort());
        }

        let cell = if player == self.human {
            self.read_human_move(player)?
        } else {
            let cell = match self.ai.choose_move(&self.board, player) {
                Ok(cell) => cell,
                Err(SearchError::NoLegalMove) => return Ok(self.abort()),
            };
            if !self.board.place(cell.x, cell.y, player) {
                tracing::warn!(%cell, "search returned an occupied cell");
                return Ok(self.abort());
            }
            self.io.out(&format!("The computer plays {} {}.", cell.x, cell.y));
            cell
        };

        tracing::debug!(%player, %cell, round = self.board.round(), "move accepted");
        self.show_board();

        if let Some(winner) = self.board.check_winner() {
            self.announce_winner(winner);
            return Ok(Phase::GameOver(GameOutcome::Winner(winner)));
        }

        if self.pie_rule && self.board.round() == 1 {
            return Ok(Phase::PieSwap);
        }

        Ok(Phase::Turn(player.opponent()))
    }

    // ========================================================================
    // LEVEL 4 - HELPERS
    // ========================================================================

    /// Prompt until the human enters an empty cell, then claim it
    fn read_human_move(&mut self, player: Player) -> Result<Cell, PlayError> {
        let prompt = format!("{} ({}) to move, enter row and column: ", player, player.symbol());

        loop {
            let Some((x, y)) = self.io.read_with(Some(prompt.as_str()), parse_coordinates)? else {
                self.io.out("Please enter two whole numbers: row column.");
                continue;
            };

            match self.board.cell_at(x, y) {
                Err(err) => self.io.out(&format!("{}. Try again.", err)),
                Ok(_) if self.board.place(x, y, player) => {
                    return Ok(Cell::new(x, y, Some(player)));
                }
                Ok(cell) => {
                    self.io.out(&format!("Cell {} is already taken. Try again.", cell));
                }
            }
        }
    }

    fn show_board(&mut self) {
        let rendered = self.board.to_string();
        self.io.out(rendered.trim_end());
    }

    fn announce_winner(&mut self, winner: Player) {
        let who = if winner == self.human {
            "You win!"
        } else {
            "The computer wins."
        };
        self.io.out(&format!("{} ({}) wins! {}", winner, winner.symbol(), who));
        tracing::info!(%winner, rounds = self.board.round(), "game over");
    }

    fn input_closed(&mut self) -> Phase {
        self.io.out("Input closed. The game ends without a winner.");
        tracing::warn!(rounds = self.board.round(), "input closed, game aborted");
        Phase::GameOver(GameOutcome::Aborted)
    }

    fn abort(&mut self) -> Phase {
        self.io.out("No legal move is left. The game ends without a winner.");
        tracing::warn!(rounds = self.board.round(), "game aborted");
        Phase::GameOver(GameOutcome::Aborted)
    }
}

/// Parse exactly two whitespace-separated integers
pub fn parse_coordinates(line: &str) -> Option<(i32, i32)> {
    let mut tokens = line.split_whitespace();
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    match tokens.next() {
        Some(_) => None,
        None => Some((x, y)),
    }
}

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// The computer takes over any opening stone off the outer ring
pub fn ai_wants_swap(board: &Board) -> bool {
    if board.round() != 1 {
        return false;
    }

    let last = board.size() as i32 - 1;
    opening_stone(board).map_or(false, |cell| {
        cell.x > 0 && cell.y > 0 && cell.x < last && cell.y < last
    })
}

fn opening_stone(board: &Board) -> Option<Cell> {
    let size = board.size() as i32;
    (0..size)
        .flat_map(|x| (0..size).map(move |y| (x, y)))
        .filter_map(|(x, y)| board.cell_at(x, y).ok())
        .find(|cell| !cell.is_empty())
}

// ============================================================================
// TESTS
// ============================================================================
