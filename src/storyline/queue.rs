//! The storyline queue and its placement protocol.
//!
//! Simultaneous triggers are collected, then placed in two rounds: the
//! non-active player places all of theirs first, in the order they choose,
//! then the active player places theirs. Resolution is FIFO from the head,
//! except that events marked [`InsertMode::Prepend`] go to the head.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::{InsertMode, StorylineEvent, StorylineEventId, TriggerDraft};
use crate::core::{IllegalAction, PlayerId, PlayerMap};

/// Where the queue is in the placement protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueState {
    /// Nothing queued and nothing awaiting placement.
    #[default]
    Idle,
    /// An action or phase boundary just produced triggers.
    CollectingTriggers,
    AwaitingNonActivePlacement,
    AwaitingActivePlacement,
    /// Events are queued and resolve from the head.
    Resolving,
}

/// A player must choose the order of their simultaneous triggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub player: PlayerId,
    pub events: Vec<StorylineEventId>,
}

/// The storyline.
///
/// ```
/// use realm_engine::core::{EntityId, PlayerId};
/// use realm_engine::storyline::{StorylineQueue, TriggerDraft};
/// use realm_engine::zones::Zone;
///
/// let active = PlayerId::new(0);
/// let mut queue = StorylineQueue::new();
/// queue.collect(
///     [
///         TriggerDraft::new(EntityId(10), "genesis", active, Zone::Realm),
///         TriggerDraft::new(EntityId(20), "genesis", active.opponent(), Zone::Realm),
///     ],
///     active,
/// );
/// assert!(queue.advance_placement().is_none());
///
/// // The non-active player's trigger resolves first.
/// assert_eq!(queue.pop_front().map(|e| e.source), Some(EntityId(20)));
/// assert_eq!(queue.pop_front().map(|e| e.source), Some(EntityId(10)));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorylineQueue {
    events: Vector<StorylineEvent>,
    state: QueueState,
    /// Collected triggers not yet placed.
    pending: PlayerMap<Vec<StorylineEvent>>,
    /// Active player for the current placement round.
    active: Option<PlayerId>,
    next_id: u32,
    clock: u64,
}

impl StorylineQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> QueueState {
        self.state
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the queue has nothing queued and nothing awaiting placement.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.events.is_empty() && self.pending.iter().all(|(_, p)| p.is_empty())
    }

    /// Queued events, head first.
    pub fn iter(&self) -> impl Iterator<Item = &StorylineEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn peek(&self) -> Option<&StorylineEvent> {
        self.events.front()
    }

    /// A cheap copy of the queued events, head first.
    #[must_use]
    pub fn snapshot(&self) -> Vector<StorylineEvent> {
        self.events.clone()
    }

    fn make_event(&mut self, draft: TriggerDraft) -> StorylineEvent {
        let id = StorylineEventId::new(self.next_id);
        self.next_id += 1;
        self.clock += 1;
        StorylineEvent::from_draft(id, self.clock, draft)
    }

    /// Start a placement round for simultaneous triggers.
    pub fn collect(&mut self, drafts: impl IntoIterator<Item = TriggerDraft>, active: PlayerId) {
        let mut any = false;
        for draft in drafts {
            let event = self.make_event(draft);
            self.pending[event.controller].push(event);
            any = true;
        }
        if any {
            self.active = Some(active);
            self.state = QueueState::CollectingTriggers;
            tracing::debug!(
                active = %active,
                non_active = self.pending[active.opponent()].len(),
                active_count = self.pending[active].len(),
                "collected simultaneous triggers"
            );
        }
    }

    /// Move the placement protocol forward as far as it can go without a
    /// player decision. Returns the decision needed, if any.
    pub fn advance_placement(&mut self) -> Option<PlacementRequest> {
        loop {
            let active = self.active?;
            match self.state {
                QueueState::CollectingTriggers => self.state = QueueState::AwaitingNonActivePlacement,
                QueueState::AwaitingNonActivePlacement | QueueState::AwaitingActivePlacement => {
                    let player = self.placing_player(active)?;
                    if self.pending[player].len() > 1 {
                        return Some(PlacementRequest {
                            player,
                            events: self.pending[player].iter().map(|e| e.id).collect(),
                        });
                    }
                    let events = std::mem::take(&mut self.pending[player]);
                    self.insert_placed(events);
                    self.finish_round();
                }
                QueueState::Idle | QueueState::Resolving => return None,
            }
        }
    }

    fn placing_player(&self, active: PlayerId) -> Option<PlayerId> {
        match self.state {
            QueueState::AwaitingNonActivePlacement => Some(active.opponent()),
            QueueState::AwaitingActivePlacement => Some(active),
            _ => None,
        }
    }

    fn finish_round(&mut self) {
        self.state = match self.state {
            QueueState::AwaitingNonActivePlacement => QueueState::AwaitingActivePlacement,
            _ if self.events.is_empty() => {
                self.active = None;
                QueueState::Idle
            }
            _ => {
                self.active = None;
                QueueState::Resolving
            }
        };
    }

    /// Place a player's pending triggers in the chosen order.
    ///
    /// `order` must be a permutation of the pending event ids.
    pub fn place(&mut self, player: PlayerId, order: &[StorylineEventId]) -> Result<(), IllegalAction> {
        let active = self.active.ok_or(IllegalAction::UnexpectedDecision)?;
        if self.placing_player(active) != Some(player) {
            return Err(IllegalAction::UnexpectedDecision);
        }

        let pending = &self.pending[player];
        let is_permutation = order.len() == pending.len()
            && order.iter().all(|id| pending.iter().any(|e| e.id == *id))
            && order.iter().enumerate().all(|(i, id)| !order[..i].contains(id));
        if !is_permutation {
            return Err(IllegalAction::InvalidTriggerOrder);
        }

        let mut pending = std::mem::take(&mut self.pending[player]);
        pending.sort_by_key(|e| order.iter().position(|id| *id == e.id));
        tracing::debug!(player = %player, count = pending.len(), "triggers placed");
        self.insert_placed(pending);
        self.finish_round();
        Ok(())
    }

    /// Insert a placed batch. Appends keep their order at the tail;
    /// prepends keep their order at the head.
    fn insert_placed(&mut self, events: Vec<StorylineEvent>) {
        let (prepends, appends): (Vec<_>, Vec<_>) =
            events.into_iter().partition(|e| e.insert_mode == InsertMode::Prepend);
        for event in prepends.into_iter().rev() {
            self.events.push_front(event);
        }
        for event in appends {
            self.events.push_back(event);
        }
    }

    /// Queue a single event directly, outside a placement round.
    pub fn enqueue(&mut self, draft: TriggerDraft) -> StorylineEventId {
        let event = self.make_event(draft);
        let id = event.id;
        match event.insert_mode {
            InsertMode::Append => self.events.push_back(event),
            InsertMode::Prepend => self.events.push_front(event),
        }
        if self.state == QueueState::Idle {
            self.state = QueueState::Resolving;
        }
        id
    }

    /// Take the head event.
    pub fn pop_front(&mut self) -> Option<StorylineEvent> {
        let event = self.events.pop_front();
        if self.events.is_empty() && self.state == QueueState::Resolving {
            self.state = QueueState::Idle;
        }
        event
    }

    /// Put an event back at the head (resolution suspended).
    pub fn push_front(&mut self, event: StorylineEvent) {
        self.events.push_front(event);
        if self.state == QueueState::Idle {
            self.state = QueueState::Resolving;
        }
    }

    /// Drop everything, queued and pending.
    pub fn clear(&mut self) {
        self.events.clear();
        for (_, pending) in self.pending.iter_mut() {
            pending.clear();
        }
        self.active = None;
        self.state = QueueState::Idle;
    }
}
