//! Connectivity checks and win detection

use rustc_hash::FxHashSet;

use crate::board::{Board, Edge, Node, Player};

impl Board {
    /// Whether `player` owns a chain of adjacent cells from `start` to `end`
    ///
    /// Iterative depth-first search seeded with the owned cells on the
    /// `start` edge. The visited set is rebuilt on every call.
    pub fn has_connection(&self, start: Edge, end: Edge, player: Player) -> bool {
        let adjacency = self.adjacency();
        let mut visited = FxHashSet::default();
        let mut stack: Vec<usize> = adjacency
            .edge_cells(start)
            .iter()
            .copied()
            .filter(|&index| self.owner_at(index) == Some(player))
            .collect();

        while let Some(index) = stack.pop() {
            if !visited.insert(index) {
                continue;
            }

            for node in adjacency.neighbors(index) {
                match *node {
                    Node::Edge(edge) if edge == end => return true,
                    Node::Edge(_) => {}
                    Node::Cell(next) => {
                        if self.owner_at(next) == Some(player) && !visited.contains(&next) {
                            stack.push(next);
                        }
                    }
                }
            }
        }

        false
    }

    /// Whether `player` has joined their two edges
    pub fn is_connected(&self, player: Player) -> bool {
        let (start, end) = player.goal_edges();
        self.has_connection(start, end, player)
    }

    /// Winner of the position, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::White, Player::Black]
            .into_iter()
            .find(|&player| self.is_connected(player))
    }

    /// Like `winner`, but skips the search while too few stones are down
    /// for either side to have connected
    pub fn check_winner(&self) -> Option<Player> {
        if !self.may_have_winner() {
            return None;
        }
        self.winner()
    }

    /// At least `2 * size - 1` placements are needed before a connection
    pub fn may_have_winner(&self) -> bool {
        self.round() as usize >= 2 * self.size() - 1
    }
}
