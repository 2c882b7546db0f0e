//! Trigger conditions.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::cards::CardInstance;
use crate::core::EntityId;

/// When a triggered ability fires, relative to the card carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerCondition {
    /// This card entered the realm.
    EntersRealm,
    /// This card died.
    Dies,
    /// This card struck another.
    Strikes,
    /// This card was struck.
    IsStruck,
    /// This card moved.
    Moves,
    /// Its controller's turn started.
    ControllerTurnStart,
    /// Its controller's turn is ending.
    ControllerTurnEnd,
}

impl TriggerCondition {
    /// Whether `event` fires this condition for `card`.
    #[must_use]
    pub fn matches(self, event: &GameEvent, card: &CardInstance) -> bool {
        let me = card.entity;
        match (self, event) {
            (Self::EntersRealm, GameEvent::EnteredRealm { card }) => *card == me,
            (Self::Dies, GameEvent::Died { card }) => *card == me,
            (Self::Strikes, GameEvent::Struck { attacker, .. }) => *attacker == me,
            (Self::IsStruck, GameEvent::Struck { defender, .. }) => *defender == me,
            (Self::Moves, GameEvent::Moved { card, .. }) => *card == me,
            (Self::ControllerTurnStart, GameEvent::TurnStarted { player }) => *player == card.controller,
            (Self::ControllerTurnEnd, GameEvent::TurnEnded { player }) => *player == card.controller,
            _ => false,
        }
    }

    /// The other card involved: the other side of a strike.
    #[must_use]
    pub fn subject(self, event: &GameEvent) -> Option<EntityId> {
        match (self, event) {
            (Self::Strikes, GameEvent::Struck { defender, .. }) => Some(*defender),
            (Self::IsStruck, GameEvent::Struck { attacker, .. }) => Some(*attacker),
            _ => None,
        }
    }

    /// Whether the condition can fire for a card that has left the realm.
    #[must_use]
    pub fn fires_off_realm(self) -> bool {
        self == Self::Dies
    }
}
