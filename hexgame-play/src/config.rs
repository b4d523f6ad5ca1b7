//! Configuration for interactive games

use hexgame_mcts::MctsConfig;

/// Standard tournament board size
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// Interactive game configuration
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Board edge length
    pub size: usize,
    /// Offer the side swap after the opening move
    pub pie_rule: bool,
    /// Computer opponent settings
    pub ai: MctsConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            pie_rule: true,
            ai: MctsConfig::default(),
        }
    }
}

impl GameConfig {
    /// Config for a board of the given size
    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn with_pie_rule(mut self, pie_rule: bool) -> Self {
        self.pie_rule = pie_rule;
        self
    }

    pub fn with_ai(mut self, ai: MctsConfig) -> Self {
        self.ai = ai;
        self
    }
}
