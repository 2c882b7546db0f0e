//! The request/response contract with the host.
//!
//! The controller never blocks. When it needs input it stops and returns a
//! [`PendingDecision`]; the host answers with a [`Decision`] and the
//! controller carries on from exactly where it stopped.

use serde::{Deserialize, Serialize};

use super::phase::{GameResult, Phase};
use crate::abilities::Ruling;
use crate::core::{PlayerAction, PlayerId, RulingRequired};
use crate::storyline::{PlacementRequest, StorylineEventId};
use crate::zones::Pile;

/// Input the controller is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// Keep the opening hand or mulligan.
    Mulligan { player: PlayerId },

    /// Draw from the atlas or the spellbook.
    ChooseDrawPile { player: PlayerId },

    /// Order simultaneous triggers.
    OrderTriggers(PlacementRequest),

    /// A human must decide what an ability does.
    Ruling(RulingRequired),

    /// `player` holds priority and may act or pass.
    Priority { player: PlayerId, phase: Phase },
}

impl PendingDecision {
    /// The player expected to answer. Rulings may come from anyone.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Self::Mulligan { player } | Self::ChooseDrawPile { player } | Self::Priority { player, .. } => {
                Some(*player)
            }
            Self::OrderTriggers(request) => Some(request.player),
            Self::Ruling(_) => None,
        }
    }
}

/// An answer to a [`PendingDecision`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// `true` takes the mulligan.
    Mulligan(bool),
    DrawFrom(Pile),
    OrderTriggers(Vec<StorylineEventId>),
    Ruling(Ruling),
    Action(PlayerAction),
}

/// Where the game stands after the controller has run as far as it can.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    Pending(PendingDecision),
    Finished(GameResult),
}

impl Progress {
    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        match self {
            Self::Pending(decision) => Some(decision),
            Self::Finished(_) => None,
        }
    }
}
