//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card in a game. Catalog data is
//! shared through an `Arc<CardDefinition>`; everything mutable (zone,
//! position, flags, damage, end-of-turn modifiers) is unique per instance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardType};
use super::flags::CardFlags;
use crate::board::{Position, Region};
use crate::core::{EntityId, PlayerId};
use crate::zones::Zone;

/// Outcome of a tap or untap request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapOutcome {
    /// The flag changed.
    Changed,
    /// Already in the requested state.
    Unchanged,
    /// The card is disabled and cannot be untapped.
    NoEffect,
}

/// Stat changes that last until the end of the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnModifiers {
    pub attack: i32,
    pub defence: i32,
    pub disabled: bool,
}

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    pub entity: EntityId,

    /// Shared catalog data.
    pub definition: Arc<CardDefinition>,

    /// Who started the game with this card.
    pub owner: PlayerId,

    /// Who currently controls it.
    pub controller: PlayerId,

    /// Current zone. Mirrors the `ZoneManager`.
    pub zone: Zone,

    /// Board position while in the realm zone.
    pub position: Option<Position>,

    pub flags: CardFlags,

    /// Capabilities from rules text, restored when the card changes zones.
    pub base_flags: CardFlags,

    /// Ability keys recognized in the rules text, in printed order.
    pub abilities: Vec<String>,

    /// Rules text the ability registry could not recognize.
    pub free_text: String,

    /// Damage marked this turn.
    pub damage: u32,

    pub modifiers: TurnModifiers,
}

impl CardInstance {
    /// Create an instance owned and controlled by `owner`.
    #[must_use]
    pub fn new(entity: EntityId, definition: Arc<CardDefinition>, owner: PlayerId, zone: Zone) -> Self {
        Self {
            entity,
            definition,
            owner,
            controller: owner,
            zone,
            position: None,
            flags: CardFlags::default(),
            base_flags: CardFlags::default(),
            abilities: Vec::new(),
            free_text: String::new(),
            damage: 0,
            modifiers: TurnModifiers::default(),
        }
    }

    /// Attach tokenized abilities and their passive capabilities.
    #[must_use]
    pub fn with_abilities(mut self, abilities: Vec<String>, free_text: String, flags: CardFlags) -> Self {
        self.abilities = abilities;
        self.free_text = free_text;
        self.base_flags = flags;
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }

    #[must_use]
    pub fn has_ability(&self, key: &str) -> bool {
        self.abilities.iter().any(|a| a == key)
    }

    #[must_use]
    pub fn is_on_realm(&self) -> bool {
        self.zone == Zone::Realm && self.position.is_some()
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.flags.is_disabled || self.modifiers.disabled
    }

    /// Attack after this turn's modifiers.
    #[must_use]
    pub fn attack(&self) -> u32 {
        apply_delta(self.definition.attack, self.modifiers.attack)
    }

    /// Defence after this turn's modifiers.
    #[must_use]
    pub fn defence(&self) -> u32 {
        apply_delta(self.definition.defence, self.modifiers.defence)
    }

    /// Defence left before this card dies.
    #[must_use]
    pub fn remaining_defence(&self) -> u32 {
        self.defence().saturating_sub(self.damage)
    }

    /// Whether marked damage has reached defence. Avatars never die this way.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.card_type() == CardType::Minion && self.damage >= self.defence()
    }

    /// Tap. Idempotent.
    pub fn apply_tap(&mut self) -> TapOutcome {
        if self.flags.is_tapped {
            return TapOutcome::Unchanged;
        }
        self.flags.is_tapped = true;
        TapOutcome::Changed
    }

    /// Untap. Idempotent; a disabled card reports `NoEffect`.
    pub fn apply_untap(&mut self) -> TapOutcome {
        if self.is_disabled() {
            return TapOutcome::NoEffect;
        }
        if !self.flags.is_tapped {
            return TapOutcome::Unchanged;
        }
        self.flags.is_tapped = false;
        TapOutcome::Changed
    }

    /// Recompute terrain-dependent flags for the region the card now stands on.
    pub fn refresh_terrain(&mut self, region: Region) {
        self.flags.can_submerge = self.flags.is_submergeable && region.is_water();
        self.flags.can_burrow = self.flags.is_burrowable && !region.is_water() && !region.is_void();
    }

    /// Clear damage and end-of-turn modifiers.
    pub fn end_turn_cleanup(&mut self) {
        self.damage = 0;
        self.modifiers = TurnModifiers::default();
    }

    /// Reset runtime state when the card changes zones.
    pub fn leave_realm(&mut self) {
        self.position = None;
        self.flags = self.base_flags;
        self.flags.reset_transient();
        self.end_turn_cleanup();
    }
}

fn apply_delta(base: u32, delta: i32) -> u32 {
    (i64::from(base) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32
}
