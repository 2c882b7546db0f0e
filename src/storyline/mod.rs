//! The storyline: this game's triggered-ability queue.
//!
//! ## Timing
//!
//! 1. An action or phase step produces simultaneous triggers
//! 2. The non-active player places theirs, in an order they choose
//! 3. The active player places theirs
//! 4. Events resolve from the head, oldest first; an effect may put a
//!    follow-up at the head instead ([`InsertMode::Prepend`])
//! 5. Each event is revalidated before it resolves and fizzles if its
//!    source or target became illegal
//! 6. When the queue is empty the active player gets [`Priority`]
//!
//! ## Key Components
//!
//! - [`StorylineQueue`]: the queue and its placement protocol
//! - [`resolve_next`]: one resolution step
//! - [`Priority`]: who may act once the queue is empty

mod event;
mod priority;
mod queue;
mod resolution;

pub use event::{InsertMode, StorylineEvent, StorylineEventId, TriggerDraft};
pub use priority::Priority;
pub use queue::{PlacementRequest, QueueState, StorylineQueue};
pub use resolution::{fizzle_reason, resolve_next, ResolutionStep};
