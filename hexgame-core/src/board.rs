//! Hex board geometry, cell ownership and move legality
//!
//! Cells are addressed by `(x, y)` where `x` is the row and `y` the column.
//! Row `x` is drawn shifted right by `x` half-cells, which gives every
//! interior cell the six neighbors listed in `NEIGHBOR_OFFSETS`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::HexError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Neighbor offsets (dx, dy) in a fixed orientation
/// Index: 0=left, 1=right, 2=upper-left, 3=upper-right, 4=lower-left, 5=lower-right
pub const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [
    (0, -1),  // left
    (0, 1),   // right
    (-1, 0),  // upper-left
    (-1, 1),  // upper-right
    (1, -1),  // lower-left
    (1, 0),   // lower-right
];

/// Maximum number of adjacency entries for any cell
pub const MAX_NEIGHBORS: usize = 6;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
///
/// White moves first and connects North to South.
/// Black connects West to East.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Board symbol
    pub fn symbol(self) -> char {
        match self {
            Player::White => 'X',
            Player::Black => 'O',
        }
    }

    /// The two edges this player has to join
    pub fn goal_edges(self) -> (Edge, Edge) {
        match self {
            Player::White => (Edge::North, Edge::South),
            Player::Black => (Edge::West, Edge::East),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Player {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Player::White),
            "black" => Ok(Player::Black),
            _ => Err(HexError::UnknownPlayer(s.trim().to_string())),
        }
    }
}

/// A board cell and its owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub owner: Option<Player>,
}

impl Cell {
    pub const fn new(x: i32, y: i32, owner: Option<Player>) -> Self {
        Self { x, y, owner }
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board edge sentinel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    North,
    South,
    West,
    East,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::North, Edge::South, Edge::West, Edge::East];

    /// Player this edge belongs to
    pub fn owner(self) -> Player {
        match self {
            Edge::North | Edge::South => Player::White,
            Edge::West | Edge::East => Player::Black,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Adjacency entry: a real cell by flat index, or an edge sentinel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Node {
    Cell(usize),
    Edge(Edge),
}

// ============================================================================
// ADJACENCY
// ============================================================================

/// Neighbor table, built once per board size and shared between clones
#[derive(Debug)]
pub(crate) struct Adjacency {
    neighbors: Vec<Vec<Node>>,
    /// Cells touching each edge, indexed by `Edge::slot`
    edge_cells: [Vec<usize>; 4],
}

impl Adjacency {
    fn build(size: usize) -> Self {
        let n = size as i32;
        let mut neighbors = Vec::with_capacity(size * size);
        let mut edge_cells: [Vec<usize>; 4] = Default::default();

        for x in 0..n {
            for y in 0..n {
                let index = (x * n + y) as usize;
                let mut row = Vec::with_capacity(MAX_NEIGHBORS);

                for &(dx, dy) in &NEIGHBOR_OFFSETS {
                    let (nx, ny) = (x + dx, y + dy);
                    if (0..n).contains(&nx) && (0..n).contains(&ny) {
                        row.push(Node::Cell((nx * n + ny) as usize));
                    }
                }

                // Corners touch two edges, border cells one, interior none
                for edge in touching_edges(x, y, n) {
                    row.push(Node::Edge(edge));
                    edge_cells[edge.slot()].push(index);
                }

                debug_assert!(row.len() <= MAX_NEIGHBORS);
                neighbors.push(row);
            }
        }

        Self {
            neighbors,
            edge_cells,
        }
    }

    pub(crate) fn neighbors(&self, index: usize) -> &[Node] {
        &self.neighbors[index]
    }

    pub(crate) fn edge_cells(&self, edge: Edge) -> &[usize] {
        &self.edge_cells[edge.slot()]
    }
}

/// Edges a cell lies on
fn touching_edges(x: i32, y: i32, n: i32) -> impl Iterator<Item = Edge> {
    [
        (x == 0, Edge::North),
        (x == n - 1, Edge::South),
        (y == 0, Edge::West),
        (y == n - 1, Edge::East),
    ]
    .into_iter()
    .filter_map(|(touches, edge)| touches.then_some(edge))
}

// ============================================================================
// BOARD
// ============================================================================

/// Hex board (clone to simulate)
///
/// Owners live in a flat array indexed by `x * size + y`, so a clone is one
/// contiguous copy. The adjacency table never changes after construction and
/// is shared between clones.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    owners: Vec<Option<Player>>,
    /// Accepted placements minus undone ones
    round: u32,
    adjacency: Arc<Adjacency>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create an empty `size` x `size` board
    ///
    /// Coordinates are `i32`, so every flat index `x * size + y` must fit one.
    pub fn new(size: usize) -> Result<Self, HexError> {
        let cells = i32::try_from(size).ok().and_then(|n| n.checked_mul(n));
        if size < 1 || cells.is_none() {
            return Err(HexError::InvalidSize { size });
        }

        Ok(Self {
            size,
            owners: vec![None; size * size],
            round: 0,
            adjacency: Arc::new(Adjacency::build(size)),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of placements currently on the board
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn cell_count(&self) -> usize {
        self.owners.len()
    }

    /// Look up a cell
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, HexError> {
        self.index_of(x, y)
            .map(|index| self.cell(index))
            .ok_or(HexError::OutOfBounds { x, y, size: self.size })
    }

    /// Sentinel cell for an edge, placed just outside the board
    pub fn sentinel(&self, edge: Edge) -> Cell {
        let n = self.size as i32;
        let (x, y) = match edge {
            Edge::North => (-1, 0),
            Edge::South => (n, 0),
            Edge::West => (0, -1),
            Edge::East => (0, n),
        };
        Cell::new(x, y, Some(edge.owner()))
    }

    /// Cells adjacent to `cell`, optionally restricted to one owner
    ///
    /// Edge sentinels are included when the cell lies on that edge and count
    /// as owned by the edge's player. Sentinels themselves have no neighbors.
    pub fn neighbors_of(&self, cell: &Cell, filter_player: Option<Player>) -> Vec<Cell> {
        let Some(index) = self.index_of(cell.x, cell.y) else {
            return Vec::new();
        };

        self.adjacency
            .neighbors(index)
            .iter()
            .map(|node| match *node {
                Node::Cell(i) => self.cell(i),
                Node::Edge(edge) => self.sentinel(edge),
            })
            .filter(|c| filter_player.map_or(true, |p| c.owner == Some(p)))
            .collect()
    }

    /// All empty cells in row-major order
    pub fn legal_moves(&self) -> Vec<Cell> {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, owner)| owner.is_none())
            .map(|(index, _)| self.cell(index))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.owners.iter().all(Option::is_some)
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Claim a cell for `player`
    ///
    /// Returns `false` without touching the board if the coordinates are off
    /// the board or the cell is already owned.
    pub fn place(&mut self, x: i32, y: i32, player: Player) -> bool {
        match self.index_of(x, y) {
            Some(index) if self.owners[index].is_none() => {
                self.owners[index] = Some(player);
                self.round += 1;
                true
            }
            _ => false,
        }
    }

    /// Clear a cell again (search and backtracking only)
    pub fn undo(&mut self, x: i32, y: i32) {
        if let Some(index) = self.index_of(x, y) {
            if self.owners[index].take().is_some() {
                self.round -= 1;
            }
        }
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let n = self.size as i32;
        if (0..n).contains(&x) && (0..n).contains(&y) {
            Some((x * n + y) as usize)
        } else {
            None
        }
    }

    fn cell(&self, index: usize) -> Cell {
        Cell::new(
            (index / self.size) as i32,
            (index % self.size) as i32,
            self.owners[index],
        )
    }

    pub(crate) fn owner_at(&self, index: usize) -> Option<Player> {
        self.owners[index]
    }

    pub(crate) fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for y in 0..self.size {
            write!(f, "{:<4}", y)?;
        }
        writeln!(f)?;

        for x in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|y| match self.owners[x * self.size + y] {
                    Some(player) => player.symbol().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{:>2} {}{}", x, " ".repeat(x), row.join(" - "))?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
