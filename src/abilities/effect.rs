//! Effect definitions.
//!
//! Effects are the atomic state changes an ability or a ruling can make.
//! Targets are relative to the storyline event being resolved, so one
//! effect list can be shared by every card with the same ability.

use serde::{Deserialize, Serialize};

use crate::storyline::InsertMode;
use crate::zones::Pile;

/// Who an effect applies to, relative to the resolving event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The card whose ability is resolving.
    Source,
    /// The event's target, if it has one.
    Target,
    /// The player controlling the event.
    Controller,
    /// The other player.
    Opponent,
}

/// An atomic game effect.
///
/// Player effects aimed at a card apply to that card's controller.
/// Card effects aimed at a player do nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Damage a minion, or reduce a player's life (avatars pass it to their controller).
    Damage { target: EffectTarget, amount: u32 },

    GainLife { target: EffectTarget, amount: u32 },

    Draw { target: EffectTarget, pile: Pile, count: usize },

    AddMana { target: EffectTarget, amount: u32 },

    Tap(EffectTarget),

    Untap(EffectTarget),

    /// Put a card into its owner's cemetery.
    Destroy(EffectTarget),

    /// Attack change until end of turn.
    ModifyAttack { target: EffectTarget, delta: i32 },

    /// Defence change until end of turn.
    ModifyDefence { target: EffectTarget, delta: i32 },

    /// Disable until end of turn.
    Disable(EffectTarget),

    /// Queue a follow-up ability from the same source.
    Trigger { ability: String, insert_mode: InsertMode },

    /// Apply effects in order.
    Batch(Vec<Effect>),
}

impl Effect {
    #[must_use]
    pub fn damage(target: EffectTarget, amount: u32) -> Self {
        Self::Damage { target, amount }
    }

    #[must_use]
    pub fn gain_life(target: EffectTarget, amount: u32) -> Self {
        Self::GainLife { target, amount }
    }

    #[must_use]
    pub fn draw(target: EffectTarget, pile: Pile, count: usize) -> Self {
        Self::Draw { target, pile, count }
    }

    #[must_use]
    pub fn buff(target: EffectTarget, attack: i32) -> Self {
        Self::ModifyAttack { target, delta: attack }
    }

    /// Queue a follow-up at the tail.
    #[must_use]
    pub fn then(ability: impl Into<String>) -> Self {
        Self::Trigger {
            ability: ability.into(),
            insert_mode: InsertMode::Append,
        }
    }

    /// Queue a follow-up that resolves next.
    #[must_use]
    pub fn immediately(ability: impl Into<String>) -> Self {
        Self::Trigger {
            ability: ability.into(),
            insert_mode: InsertMode::Prepend,
        }
    }

    /// Number of leaf effects.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Batch(effects) => effects.iter().map(Effect::len).sum(),
            _ => 1,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
