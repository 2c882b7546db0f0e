//! Turn flow: phases, pending decisions, and the controller that drives a game.
//!
//! ## Example
//!
//! ```
//! use realm_engine::abilities::AbilityRegistry;
//! use realm_engine::cards::{CardDefinition, CardId, CardRegistry, CardType};
//! use realm_engine::core::{EngineConfig, PlayerMap};
//! use realm_engine::turn::{Decision, DeckList, PendingDecision, Progress, TurnController};
//!
//! let mut catalog = CardRegistry::new();
//! catalog.register(CardDefinition::new(CardId::new(0), "Sorcerer", CardType::Avatar)).unwrap();
//! catalog.register(CardDefinition::new(CardId::new(1), "Valley", CardType::Site)).unwrap();
//! catalog.register(CardDefinition::new(CardId::new(2), "Squire", CardType::Minion)).unwrap();
//!
//! let deck = DeckList::new(["Sorcerer"]).with("Valley", 6).with("Squire", 8);
//! let mut game = TurnController::new(
//!     EngineConfig::new(42),
//!     AbilityRegistry::with_builtins(),
//!     &catalog,
//!     &PlayerMap::with_value(deck),
//! )
//! .unwrap();
//!
//! let progress = game.progress().unwrap();
//! let Progress::Pending(PendingDecision::Mulligan { player }) = progress else {
//!     panic!("expected a mulligan decision");
//! };
//! game.decide(player, Decision::Mulligan(false)).unwrap();
//! ```

mod controller;
mod decision;
mod phase;
mod setup;

pub use controller::TurnController;
pub use decision::{Decision, PendingDecision, Progress};
pub use phase::{GameResult, Phase};
pub use setup::{DeckList, AVATAR_START};
