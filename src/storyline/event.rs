//! Storyline events.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::zones::Zone;

/// Identifier for a storyline event, unique within a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StorylineEventId(pub u32);

impl StorylineEventId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StorylineEventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// Where a new event enters the storyline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertMode {
    /// Tail: resolves after everything already queued.
    #[default]
    Append,
    /// Head: resolves next.
    Prepend,
}

/// A triggered or activated ability waiting to be queued.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerDraft {
    /// The card whose ability fired.
    pub source: EntityId,

    /// Ability key in the registry.
    pub ability: String,

    pub controller: PlayerId,

    /// Chosen target. Must still be on the realm when the event resolves.
    pub target: Option<EntityId>,

    /// The other card involved in the triggering event, such as the other
    /// side of a strike. Not revalidated: it may have died meanwhile.
    pub subject: Option<EntityId>,

    /// Zone the source must still be in when the event resolves.
    pub source_zone: Zone,

    pub insert_mode: InsertMode,
}

impl TriggerDraft {
    #[must_use]
    pub fn new(source: EntityId, ability: impl Into<String>, controller: PlayerId, source_zone: Zone) -> Self {
        Self {
            source,
            ability: ability.into(),
            controller,
            target: None,
            subject: None,
            source_zone,
            insert_mode: InsertMode::Append,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_subject(mut self, subject: Option<EntityId>) -> Self {
        self.subject = subject;
        self
    }

    #[must_use]
    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        self.insert_mode = mode;
        self
    }
}

/// An event on the storyline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorylineEvent {
    pub id: StorylineEventId,

    pub source: EntityId,

    pub ability: String,

    pub controller: PlayerId,

    pub target: Option<EntityId>,

    pub subject: Option<EntityId>,

    pub source_zone: Zone,

    pub insert_mode: InsertMode,

    /// Creation order within the game.
    pub timestamp: u64,
}

impl StorylineEvent {
    #[must_use]
    pub fn from_draft(id: StorylineEventId, timestamp: u64, draft: TriggerDraft) -> Self {
        Self {
            id,
            source: draft.source,
            ability: draft.ability,
            controller: draft.controller,
            target: draft.target,
            subject: draft.subject,
            source_zone: draft.source_zone,
            insert_mode: draft.insert_mode,
            timestamp,
        }
    }
}
