//! Core engine types: entities, players, state, actions, RNG, configuration.
//!
//! Everything else in the crate builds on these. `GameState` is the single
//! owner of a game's data; the other modules read it and mutate it only
//! through its methods.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod log;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionRecord, PlayerAction};
pub use config::EngineConfig;
pub use entity::EntityId;
pub use error::{EngineError, IllegalAction, InvariantViolation, Result, RulingRequired};
pub use log::{FizzleReason, LogEntry};
pub use player::{Player, PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
pub use state::{CardView, GameState, PlayerView, PublicState};
