//! Configuration for a slot machine.

/// Configuration for a slot machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// RNG seed for reproducible spins. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of reels (1-8).
    pub reel_count: usize,
    /// Minimum time before the first reel stops, in milliseconds.
    pub base_spin_ms: u64,
    /// Stagger between consecutive reels, in milliseconds.
    pub reel_delay_ms: u64,
    /// Interval between glyph changes on a spinning reel, in milliseconds.
    pub tick_ms: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reel_count: 3,
            base_spin_ms: 2200,
            reel_delay_ms: 450,
            tick_ms: 80,
        }
    }
}

impl MachineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of reels (clamped to 1-8).
    pub fn with_reel_count(mut self, reels: usize) -> Self {
        self.reel_count = reels.clamp(1, 8);
        self
    }

    /// Set reel timing. A zero tick interval is raised to 1 ms.
    pub fn with_timing(mut self, base_spin_ms: u64, reel_delay_ms: u64, tick_ms: u64) -> Self {
        self.base_spin_ms = base_spin_ms;
        self.reel_delay_ms = reel_delay_ms;
        self.tick_ms = tick_ms.max(1);
        self
    }
}
