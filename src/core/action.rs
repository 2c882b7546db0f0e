//! Player actions.
//!
//! Actions are what a player may do when they hold priority. Each one is
//! validated against the rules before anything changes; a rejected action
//! leaves the game untouched.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::board::{Coord, Layer};

/// A game action.
///
/// ```
/// use realm_engine::board::Coord;
/// use realm_engine::core::{EntityId, PlayerAction};
///
/// let play = PlayerAction::PlaySite { card: EntityId(12), at: Coord::new(4, 1) };
/// assert!(play.is_main_phase_only());
/// assert!(!PlayerAction::Pass.is_main_phase_only());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Play a site from hand onto an empty cell.
    PlaySite { card: EntityId, at: Coord },

    /// Cast a spell from hand.
    ///
    /// Minions and artifacts need a cell, auras an intersection, and magic
    /// takes neither. `target` is handed to the spell's storyline event.
    CastSpell {
        card: EntityId,
        at: Option<Coord>,
        target: Option<EntityId>,
    },

    /// Move a unit, optionally below the surface.
    Move { card: EntityId, to: Coord, layer: Layer },

    /// Strike another unit.
    Attack { attacker: EntityId, defender: EntityId },

    /// Use an activated ability.
    Activate {
        card: EntityId,
        ability: String,
        target: Option<EntityId>,
    },

    /// Decline to act.
    Pass,

    Concede,
}

impl PlayerAction {
    /// Whether only the active player may take this action, in the main phase.
    #[must_use]
    pub fn is_main_phase_only(&self) -> bool {
        !matches!(self, Self::Activate { .. } | Self::Pass | Self::Concede)
    }

    /// The card the action is about, if any.
    #[must_use]
    pub fn card(&self) -> Option<EntityId> {
        match self {
            Self::PlaySite { card, .. }
            | Self::CastSpell { card, .. }
            | Self::Move { card, .. }
            | Self::Activate { card, .. } => Some(*card),
            Self::Attack { attacker, .. } => Some(*attacker),
            Self::Pass | Self::Concede => None,
        }
    }
}

/// An action as it was taken, for history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,

    pub action: PlayerAction,

    /// Turn the action was taken on.
    pub turn: u32,

    /// Order within the game.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: PlayerAction, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
