//! Card system: catalog definitions, runtime instances and legality.
//!
//! ## Key Types
//!
//! - `CardDefinition`: immutable catalog data shared by every copy of a card
//! - `CatalogEntry`: the external dataset shape, converted into definitions
//! - `CardRegistry`: definition lookup by id and by name
//! - `CardFlags`: the per-card capability set
//! - `CardInstance`: runtime state for one physical card
//!
//! The `legality` module answers "may this card move there" and "may this
//! card strike that one", and computes strike damage.

pub mod catalog;
pub mod definition;
pub mod element;
pub mod flags;
pub mod instance;
pub mod legality;
pub mod registry;

pub use catalog::{CatalogEntry, OneOrMany};
pub use definition::{CardDefinition, CardId, CardType, MovementKind};
pub use element::{Element, Thresholds};
pub use flags::{Capability, CardFlags};
pub use instance::{CardInstance, TapOutcome, TurnModifiers};
pub use legality::{
    can_move, can_strike, check_move, check_strike, region_allows, resolve_strike, CardLookup, Combatant,
    StrikeKind, StrikeResult,
};
pub use registry::CardRegistry;
