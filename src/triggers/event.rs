//! Game events.
//!
//! Events record what just happened. The engine emits them while it
//! mutates state; triggered abilities are matched against them when the
//! current action or phase step finishes.

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::core::{EntityId, PlayerId};

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    TurnStarted { player: PlayerId },

    TurnEnded { player: PlayerId },

    /// A card was put onto the realm.
    EnteredRealm { card: EntityId },

    /// A card went from the realm to the cemetery.
    Died { card: EntityId },

    Struck { attacker: EntityId, defender: EntityId },

    Moved { card: EntityId, from: Position, to: Position },
}

impl GameEvent {
    /// The card the event is about, if any.
    #[must_use]
    pub fn subject(&self) -> Option<EntityId> {
        match self {
            Self::TurnStarted { .. } | Self::TurnEnded { .. } => None,
            Self::EnteredRealm { card } | Self::Died { card } | Self::Moved { card, .. } => Some(*card),
            Self::Struck { attacker, .. } => Some(*attacker),
        }
    }
}
