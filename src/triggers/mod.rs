//! Trigger detection.
//!
//! While an action or phase step runs, the engine records [`GameEvent`]s.
//! When it finishes, [`collect_triggers`] matches them against the
//! triggered abilities of the cards involved and hands the resulting
//! drafts to the storyline as one simultaneous batch.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: something that just happened
//! - [`TriggerCondition`]: when an ability fires, relative to its card
//! - [`collect_triggers`]: events → trigger drafts

mod collect;
mod condition;
mod event;

pub use collect::collect_triggers;
pub use condition::TriggerCondition;
pub use event::GameEvent;
