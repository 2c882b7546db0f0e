//! The game journal.
//!
//! Every observable thing the engine does is appended to the journal as a
//! [`LogEntry`]. Presentation collaborators read it to animate the game;
//! tests read it to check what happened. Fizzles live here, not in the
//! error types.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::board::Position;
use crate::cards::{StrikeResult, TapOutcome};
use crate::storyline::StorylineEventId;
use crate::turn::{GameResult, Phase};
use crate::zones::{Pile, Zone};

/// Why a storyline event fizzled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FizzleReason {
    /// The source is no longer in the zone it triggered from.
    SourceLeft { expected: Zone, now: Option<Zone> },
    /// The target card is no longer on the realm.
    TargetGone(EntityId),
}

/// One journal entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEntry {
    PhaseChanged { turn: u32, player: PlayerId, phase: Phase },

    Mulligan { player: PlayerId },

    Drew { player: PlayerId, pile: Pile, card: EntityId },

    /// A card was put onto the realm.
    Played { player: PlayerId, card: EntityId, position: Position },

    /// A spell was cast without a board position.
    Cast { player: PlayerId, card: EntityId },

    Moved { card: EntityId, from: Position, to: Position },

    Struck { attacker: EntityId, defender: EntityId, result: StrikeResult },

    Damaged { card: EntityId, amount: u32 },

    LifeChanged { player: PlayerId, life: i32 },

    Died { card: EntityId },

    Tapped { card: EntityId, outcome: TapOutcome },

    Untapped { card: EntityId, outcome: TapOutcome },

    Resolved { event: StorylineEventId, ability: String, source: EntityId },

    Fizzled { event: StorylineEventId, ability: String, reason: FizzleReason },

    RulingApplied { event: StorylineEventId, ability: String, source_name: String },

    Conceded { player: PlayerId },

    GameOver(GameResult),
}
