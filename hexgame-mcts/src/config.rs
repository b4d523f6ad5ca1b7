//! Search configuration

/// Simulations per candidate used by the interactive opponent
pub const DEFAULT_SIMULATIONS: u32 = 200;

/// Monte-Carlo search configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MctsConfig {
    /// Random playouts per candidate move
    pub simulations: u32,
    /// Base seed for playouts (None = fresh random seed per search)
    pub seed: Option<u64>,
    /// Score candidates on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}

impl MctsConfig {
    /// Config with the given simulation budget
    pub fn with_simulations(simulations: u32) -> Self {
        Self {
            simulations,
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Score candidates on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
