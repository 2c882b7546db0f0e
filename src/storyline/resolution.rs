//! Resolving the head of the storyline.

use serde::{Deserialize, Serialize};

use super::event::{StorylineEvent, StorylineEventId};
use crate::abilities::AbilityRegistry;
use crate::core::{EngineError, FizzleReason, GameState, LogEntry};

/// What one resolution step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStep {
    Resolved(StorylineEventId),
    /// Discarded because its source or target became illegal.
    Fizzled(StorylineEventId),
    /// Nothing was queued.
    Empty,
}

/// Why `event` can no longer resolve, if it cannot.
///
/// Only the source and the chosen target are checked. The event's subject
/// is allowed to be gone.
#[must_use]
pub fn fizzle_reason(state: &GameState, event: &StorylineEvent) -> Option<FizzleReason> {
    if !event.source.is_player() {
        let now = state.zone_of(event.source);
        if now != Some(event.source_zone) {
            return Some(FizzleReason::SourceLeft {
                expected: event.source_zone,
                now,
            });
        }
    }

    let target = event.target.filter(|t| !t.is_player())?;
    match state.card(target) {
        Some(card) if card.is_on_realm() => None,
        _ => Some(FizzleReason::TargetGone(target)),
    }
}

/// Pop the head event and resolve it.
///
/// An event whose source or target became illegal fizzles: it is logged
/// and dropped. If the registry needs a ruling the event goes back to the
/// head untouched and [`EngineError::RulingRequired`] is returned. An
/// invariant violation is returned as is.
pub fn resolve_next(state: &mut GameState, registry: &AbilityRegistry) -> Result<ResolutionStep, EngineError> {
    let Some(event) = state.storyline.pop_front() else {
        return Ok(ResolutionStep::Empty);
    };

    if let Some(reason) = fizzle_reason(state, &event) {
        tracing::info!(event = %event.id, ability = %event.ability, ?reason, "fizzled");
        state.log(LogEntry::Fizzled {
            event: event.id,
            ability: event.ability.clone(),
            reason,
        });
        return Ok(ResolutionStep::Fizzled(event.id));
    }

    match registry.resolve(&event, state) {
        Ok(()) => {
            tracing::debug!(event = %event.id, ability = %event.ability, source = %event.source, "resolved");
            state.log(LogEntry::Resolved {
                event: event.id,
                ability: event.ability.clone(),
                source: event.source,
            });
            Ok(ResolutionStep::Resolved(event.id))
        }
        Err(EngineError::RulingRequired(required)) => {
            state.storyline.push_front(event);
            Err(required.into())
        }
        Err(err) => Err(err),
    }
}
