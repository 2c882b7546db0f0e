//! Effect resolution - executing effects on game state.

use crate::cards::CardInstance;
use crate::core::{EntityId, GameState, InvariantViolation, LogEntry, PlayerId};
use crate::storyline::{StorylineEvent, TriggerDraft};

use super::effect::{Effect, EffectTarget};

/// Applies effects on behalf of a resolving storyline event.
///
/// Effects whose target is missing or of the wrong kind are skipped; the
/// event itself already passed revalidation, so a skipped leaf is not a
/// fizzle. Without a chosen target, `EffectTarget::Target` falls back to
/// the event's subject while that card is still on the realm.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply effects in order.
    pub fn apply(state: &mut GameState, event: &StorylineEvent, effects: &[Effect]) -> Result<(), InvariantViolation> {
        for effect in effects {
            Self::apply_one(state, event, effect)?;
        }
        Ok(())
    }

    fn entity(state: &GameState, event: &StorylineEvent, target: EffectTarget) -> Option<EntityId> {
        match target {
            EffectTarget::Source => Some(event.source),
            EffectTarget::Target => event.target.or_else(|| {
                event
                    .subject
                    .filter(|s| state.card(*s).is_some_and(CardInstance::is_on_realm))
            }),
            EffectTarget::Controller => Some(EntityId::player(event.controller)),
            EffectTarget::Opponent => Some(EntityId::player(event.controller.opponent())),
        }
    }

    fn player(state: &GameState, event: &StorylineEvent, target: EffectTarget) -> Option<PlayerId> {
        let entity = Self::entity(state, event, target)?;
        entity.as_player().or_else(|| state.card(entity).map(|c| c.controller))
    }

    fn card(state: &GameState, event: &StorylineEvent, target: EffectTarget) -> Option<EntityId> {
        Self::entity(state, event, target).filter(|e| !e.is_player() && state.card(*e).is_some())
    }

    fn apply_one(state: &mut GameState, event: &StorylineEvent, effect: &Effect) -> Result<(), InvariantViolation> {
        match effect {
            Effect::Damage { target, amount } => {
                if let Some(entity) = Self::entity(state, event, *target) {
                    state.apply_damage(entity, *amount);
                }
            }

            Effect::GainLife { target, amount } => {
                if let Some(player) = Self::player(state, event, *target) {
                    let life = {
                        let p = state.player_mut(player);
                        p.gain_life(*amount);
                        p.life
                    };
                    state.log(LogEntry::LifeChanged { player, life });
                }
            }

            Effect::Draw { target, pile, count } => {
                if let Some(player) = Self::player(state, event, *target) {
                    for _ in 0..*count {
                        if state.draw(player, *pile).is_err() {
                            break;
                        }
                    }
                }
            }

            Effect::AddMana { target, amount } => {
                if let Some(player) = Self::player(state, event, *target) {
                    state.player_mut(player).mana += amount;
                }
            }

            Effect::Tap(target) => {
                if let Some(card) = Self::card(state, event, *target) {
                    state.set_tapped(card, true);
                }
            }

            Effect::Untap(target) => {
                if let Some(card) = Self::card(state, event, *target) {
                    state.set_tapped(card, false);
                }
            }

            Effect::Destroy(target) => {
                if let Some(card) = Self::card(state, event, *target) {
                    state.destroy(card)?;
                }
            }

            Effect::ModifyAttack { target, delta } => {
                if let Some(card) = Self::card(state, event, *target).and_then(|e| state.card_mut(e)) {
                    card.modifiers.attack += delta;
                }
            }

            Effect::ModifyDefence { target, delta } => {
                if let Some(card) = Self::card(state, event, *target).and_then(|e| state.card_mut(e)) {
                    card.modifiers.defence += delta;
                }
            }

            Effect::Disable(target) => {
                if let Some(card) = Self::card(state, event, *target).and_then(|e| state.card_mut(e)) {
                    card.modifiers.disabled = true;
                }
            }

            Effect::Trigger { ability, insert_mode } => {
                let Some(zone) = state.zone_of(event.source) else {
                    return Ok(());
                };
                let mut draft = TriggerDraft::new(event.source, ability.clone(), event.controller, zone)
                    .with_subject(event.subject)
                    .with_insert_mode(*insert_mode);
                draft.target = event.target;
                let id = state.storyline.enqueue(draft);
                tracing::debug!(event = %id, ability = %ability, mode = ?insert_mode, "follow-up queued");
            }

            Effect::Batch(effects) => Self::apply(state, event, effects)?,
        }
        Ok(())
    }
}
