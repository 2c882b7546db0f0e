//! Matching events to triggered abilities.

use super::event::GameEvent;
use crate::abilities::{AbilityHandler, AbilityRegistry};
use crate::core::{EntityId, GameState};
use crate::storyline::TriggerDraft;

/// Find every triggered ability fired by `events`.
///
/// Candidates are the cards on the realm, in entity order, plus cards that
/// died during these events. Disabled cards do not trigger. Each draft
/// records the zone its source is in now, so the event fizzles if the
/// source moves before it resolves.
pub fn collect_triggers(events: &[GameEvent], state: &GameState, registry: &AbilityRegistry) -> Vec<TriggerDraft> {
    let mut candidates: Vec<EntityId> = state.realm_cards();
    for event in events {
        if let GameEvent::Died { card } = event {
            if !candidates.contains(card) {
                candidates.push(*card);
            }
        }
    }
    candidates.sort_unstable();

    let mut drafts = Vec::new();
    for event in events {
        for &entity in &candidates {
            let Some(card) = state.card(entity) else {
                continue;
            };
            if card.is_disabled() {
                continue;
            }
            for ability in &card.abilities {
                let Some(AbilityHandler::Triggered { condition, insert_mode, .. }) = registry.get(ability) else {
                    continue;
                };
                if !card.is_on_realm() && !condition.fires_off_realm() {
                    continue;
                }
                if !condition.matches(event, card) {
                    continue;
                }

                let draft = TriggerDraft::new(entity, ability.clone(), card.controller, card.zone)
                    .with_subject(condition.subject(event))
                    .with_insert_mode(*insert_mode);
                tracing::debug!(card = %entity, ability = %ability, ?event, "ability triggered");
                drafts.push(draft);
            }
        }
    }
    drafts
}
