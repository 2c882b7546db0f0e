//! Engine configuration.
//!
//! Everything the host can tune is passed in once, at construction, through
//! `EngineConfig`. There is no process-wide mutable state.

use serde::{Deserialize, Serialize};

/// Configuration for a single game instance.
///
/// ```
/// use realm_engine::core::EngineConfig;
///
/// let config = EngineConfig::new(7).with_debug_mode();
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.opening_hand_size(), 7);
/// assert!(config.debug_mode);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for every shuffle in the game.
    pub seed: u64,

    /// Life each player starts with.
    pub starting_life: i32,

    /// Sites drawn from the atlas into the opening hand.
    pub opening_sites: usize,

    /// Spells drawn from the spellbook into the opening hand.
    pub opening_spells: usize,

    /// The player going first skips the draw on turn 1.
    pub skip_first_draw: bool,

    /// Mulligans each player may take during setup.
    pub max_mulligans: u32,

    /// Check state invariants after every mutation step.
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a configuration with default rules and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            starting_life: 20,
            opening_sites: 3,
            opening_spells: 4,
            skip_first_draw: true,
            max_mulligans: 1,
            debug_mode: false,
        }
    }

    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the opening hand split between atlas and spellbook.
    #[must_use]
    pub fn with_opening_hand(mut self, sites: usize, spells: usize) -> Self {
        self.opening_sites = sites;
        self.opening_spells = spells;
        self
    }

    #[must_use]
    pub fn with_first_draw(mut self) -> Self {
        self.skip_first_draw = false;
        self
    }

    #[must_use]
    pub fn with_max_mulligans(mut self, count: u32) -> Self {
        self.max_mulligans = count;
        self
    }

    #[must_use]
    pub fn with_debug_mode(mut self) -> Self {
        self.debug_mode = true;
        self
    }

    /// Total cards in the opening hand.
    #[must_use]
    pub fn opening_hand_size(&self) -> usize {
        self.opening_sites + self.opening_spells
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.opening_hand_size(), 7);
        assert!(config.skip_first_draw);
        assert!(!config.debug_mode);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(3)
            .with_starting_life(10)
            .with_opening_hand(2, 3)
            .with_first_draw()
            .with_max_mulligans(0);

        assert_eq!(config.starting_life, 10);
        assert_eq!(config.opening_hand_size(), 5);
        assert!(!config.skip_first_draw);
        assert_eq!(config.max_mulligans, 0);
    }
}
