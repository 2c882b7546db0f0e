//! # realm-engine
//!
//! Rules-resolution core for a two-player card game played on a 5×4 grid.
//!
//! ## Design Principles
//!
//! 1. **Rules only**: no rendering, no I/O. Collaborators hand in plain data
//!    (a card catalog, deck lists, decisions) and read plain data back
//!    (snapshots, the journal, pending decisions).
//!
//! 2. **Explicit capabilities**: legality is decided from a flat set of card
//!    flags, never from a card's name or kind of object.
//!
//! 3. **Ask, don't guess**: an ability the engine cannot resolve pauses the
//!    storyline with a ruling request instead of doing nothing.
//!
//! 4. **Deterministic**: one seeded RNG; the same seed and inputs replay the
//!    same game.
//!
//! ## Modules
//!
//! - `core`: entity IDs, players, configuration, errors, actions, game state, journal
//! - `board`: grid topology, regions, intersections, projectile rays
//! - `cards`: catalog, card flags, runtime instances, movement and strike legality
//! - `zones`: atlas, spellbook, hand, cemetery, realm; draws and mulligans
//! - `abilities`: keyword tokenizing, effects, ability registry, rulings
//! - `triggers`: game events and trigger matching
//! - `storyline`: the triggered-ability queue, its placement protocol, priority
//! - `turn`: phases and the turn controller

pub mod abilities;
pub mod board;
pub mod cards;
pub mod core;
pub mod storyline;
pub mod triggers;
pub mod turn;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EngineError, EntityId, GameState, IllegalAction, InvariantViolation, LogEntry, PlayerAction,
    PlayerId, PlayerMap, PublicState, RulingRequired,
};

pub use crate::board::{Board, Coord, Layer, Position, Region};

pub use crate::cards::{CardDefinition, CardFlags, CardInstance, CardRegistry, CardType, CatalogEntry};

pub use crate::zones::{Pile, Zone, ZoneManager};

pub use crate::abilities::{AbilityHandler, AbilityRegistry, Effect, EffectTarget, Ruling};

pub use crate::triggers::{GameEvent, TriggerCondition};

pub use crate::storyline::{InsertMode, StorylineEvent, StorylineQueue};

pub use crate::turn::{Decision, DeckList, GameResult, PendingDecision, Phase, Progress, TurnController};
