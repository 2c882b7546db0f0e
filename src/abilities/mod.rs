//! Abilities: rules-text keywords, effects, and their resolution.
//!
//! ## Key Components
//!
//! - [`tokenize`]: split printed rules text into ability keys and free text
//! - [`Effect`]: atomic state changes, targeted relative to the resolving event
//! - [`AbilityRegistry`]: keyword → [`AbilityHandler`] table
//! - [`RulingBook`]: human rulings recorded for the rest of the game
//!
//! Passive abilities are read once, when a card is created, and live on as
//! card flags. Triggered and activated abilities travel through the
//! storyline and come back here to resolve.

mod effect;
mod keyword;
mod registry;
mod resolver;
mod ruling;

pub use effect::{Effect, EffectTarget};
pub use keyword::{normalize, tokenize, RulesText, CAST, DEATHRITE, GENESIS, PASSIVE_KEYWORDS, TAP};
pub use registry::{AbilityHandler, AbilityRegistry, ActivationCost};
pub use resolver::EffectResolver;
pub use ruling::{Ruling, RulingBook};
