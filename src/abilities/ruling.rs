//! Human rulings.
//!
//! When the registry cannot resolve an ability it asks for a ruling. The
//! ruling is recorded against the card name and ability, so the same
//! interaction resolves the same way for the rest of the game.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::effect::Effect;

/// A decision supplied by a human for an ability the engine cannot resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruling {
    /// Resolve by applying these effects.
    Effects(Vec<Effect>),
    /// The ability does nothing in this situation.
    NoEffect,
}

impl Ruling {
    /// Effects to apply, empty for `NoEffect`.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        match self {
            Self::Effects(effects) => effects,
            Self::NoEffect => &[],
        }
    }
}

/// Rulings given so far in a game, by card name then ability.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulingBook {
    rulings: FxHashMap<String, FxHashMap<String, Ruling>>,
}

impl RulingBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a ruling. A later ruling for the same key replaces the earlier one.
    pub fn record(&mut self, card_name: &str, ability: &str, ruling: Ruling) {
        tracing::info!(card = card_name, ability, ?ruling, "ruling recorded");
        self.rulings
            .entry(card_name.to_string())
            .or_default()
            .insert(ability.to_string(), ruling);
    }

    #[must_use]
    pub fn get(&self, card_name: &str, ability: &str) -> Option<&Ruling> {
        self.rulings.get(card_name)?.get(ability)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rulings.values().map(FxHashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rulings.is_empty()
    }
}
