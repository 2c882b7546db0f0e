//! Error types for the rules core.
//!
//! Three kinds of failure cross the engine boundary:
//!
//! - [`IllegalAction`]: the attempted action breaks a rule. State is untouched
//!   and the initiating player chooses again.
//! - [`RulingRequired`]: the engine cannot resolve an ability on its own. The
//!   event is held at the head of the storyline until a human supplies a ruling.
//! - [`InvariantViolation`]: the game state is corrupt. Fatal for this game.
//!
//! Fizzles are not errors; they are journal entries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::EntityId;
use super::player::PlayerId;
use crate::board::{Coord, Region};
use crate::cards::Element;
use crate::storyline::StorylineEventId;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// An action rejected by the rules.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum IllegalAction {
    #[error("the game is over")]
    GameOver,

    #[error("{0} does not have priority")]
    NotYourPriority(PlayerId),

    #[error("only the active player may do that")]
    NotActivePlayer,

    #[error("the storyline must be empty before a new action")]
    StorylineNotEmpty,

    #[error("no decision of that kind is pending")]
    UnexpectedDecision,

    #[error("card {0} not found")]
    CardNotFound(EntityId),

    #[error("card {0} is not in its controller's hand")]
    NotInHand(EntityId),

    #[error("card {0} is not on the realm")]
    NotOnRealm(EntityId),

    #[error("{player} does not control {card}")]
    NotController { player: PlayerId, card: EntityId },

    #[error("card {0} is tapped")]
    Tapped(EntityId),

    #[error("card {0} has summoning sickness")]
    SummoningSick(EntityId),

    #[error("card {0} is immobile")]
    Immobile(EntityId),

    #[error("card {0} is disabled")]
    Disabled(EntityId),

    #[error("card {card} may not enter {region:?} at {at}")]
    ForbiddenRegion { card: EntityId, region: Region, at: Coord },

    #[error("{at} is {distance} steps away, card moves {movement}")]
    OutOfRange { at: Coord, distance: u32, movement: u32 },

    #[error("{0} is off the board")]
    OffBoard(Coord),

    #[error("card {card} cannot go below the surface at {at}")]
    NoSubsurfaceAccess { card: EntityId, at: Coord },

    #[error("card is already at {0}")]
    AlreadyThere(Coord),

    #[error("target {0} is not within striking range")]
    NotInStrikeRange(EntityId),

    #[error("line of fire to {target} is blocked by {blocker}")]
    NoLineOfFire { target: EntityId, blocker: EntityId },

    #[error("a card cannot strike itself")]
    SelfStrike,

    #[error("need {required} mana, have {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("need {required} {element:?} threshold, have {available}")]
    ThresholdNotMet { element: Element, required: u32, available: u32 },

    #[error("{0} already holds a site")]
    SiteOccupied(Coord),

    #[error("{0} holds no site")]
    NoSite(Coord),

    #[error("{player} does not control the site at {at}")]
    NotYourSite { player: PlayerId, at: Coord },

    #[error("{0} is not next to the avatar or a site you control")]
    SiteNotConnected(Coord),

    #[error("card {0} cannot be played that way")]
    WrongCardType(EntityId),

    #[error("{0} controls no spellcaster on the realm")]
    NoSpellcaster(PlayerId),

    #[error("the chosen pile is empty")]
    PileEmpty,

    #[error("card {card} has no activated ability {ability:?}")]
    NotActivated { card: EntityId, ability: String },

    #[error("trigger order must be a permutation of the pending events")]
    InvalidTriggerOrder,
}

/// The engine needs a human ruling to continue.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("ruling required for {ability:?} on {source_name}: {reason}")]
pub struct RulingRequired {
    /// The suspended storyline event.
    pub event: StorylineEventId,

    /// Ability key that could not be resolved.
    pub ability: String,

    /// Name of the card the ability comes from.
    pub source_name: String,

    /// Why the registry could not decide.
    pub reason: String,
}

/// Corrupt game state. Fatal for the current game.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("grid index {index} assigned twice")]
    GridIndexCollision { index: u32 },

    #[error("intersection at {at} references missing cell {missing}")]
    DanglingIntersection { at: Coord, missing: Coord },

    #[error("entity {0} is already tracked in a zone")]
    ZoneDoubleOwnership(EntityId),

    #[error("entity {0} is not tracked by any zone")]
    UntrackedEntity(EntityId),

    #[error("board and card disagree on the position of {0}")]
    PositionMismatch(EntityId),

    #[error("{player} life {life} is below the floor")]
    LifeBelowFloor { player: PlayerId, life: i32 },

    #[error("catalog already contains {0:?}")]
    DuplicateCatalogEntry(String),

    #[error("unknown entity {0}")]
    UnknownEntity(EntityId),

    #[error("deck lists {0:?}, which is not in the catalog")]
    UnknownCard(String),

    #[error("{player}'s deck has {count} avatars, expected 1")]
    AvatarCount { player: PlayerId, count: usize },
}

/// Top-level error for engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EngineError {
    #[error("illegal action: {0}")]
    IllegalAction(#[from] IllegalAction),

    #[error(transparent)]
    RulingRequired(#[from] RulingRequired),

    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}

impl EngineError {
    /// Whether the current game can continue after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
