//! Keyword to behavior dispatch.
//!
//! The registry is a static table of tagged handlers, filled once at
//! startup and queried by ability key. Passive handlers become card flags
//! when a card is created. Triggered and activated handlers produce
//! storyline events and resolve them when their effects are known;
//! anything else asks for a ruling.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::effect::Effect;
use super::keyword::{self, RulesText, DEATHRITE, GENESIS, PASSIVE_KEYWORDS, TAP};
use super::resolver::EffectResolver;
use crate::cards::{CardFlags, Capability};
use crate::core::{EngineError, GameState, LogEntry, RulingRequired};
use crate::storyline::{InsertMode, StorylineEvent};
use crate::triggers::TriggerCondition;

/// What an activated ability costs to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationCost {
    Free,
    /// Tap the card.
    Tap,
    /// Pay mana.
    Mana(u32),
}

/// Behavior bound to an ability key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityHandler {
    /// Continuously applied; never queued.
    Passive(Capability),

    /// Queued when `condition` matches a game event.
    ///
    /// `effects` is `None` when the effect is card-specific and only
    /// described in rules text.
    Triggered {
        condition: TriggerCondition,
        effects: Option<Vec<Effect>>,
        insert_mode: InsertMode,
    },

    /// Queued when a player activates it.
    Activated {
        cost: ActivationCost,
        effects: Option<Vec<Effect>>,
    },
}

impl AbilityHandler {
    #[must_use]
    pub fn triggered(condition: TriggerCondition) -> Self {
        Self::Triggered {
            condition,
            effects: None,
            insert_mode: InsertMode::Append,
        }
    }

    #[must_use]
    pub fn activated(cost: ActivationCost) -> Self {
        Self::Activated { cost, effects: None }
    }

    /// Attach effects the engine can apply on its own.
    #[must_use]
    pub fn with_effects(mut self, list: Vec<Effect>) -> Self {
        match &mut self {
            Self::Triggered { effects, .. } | Self::Activated { effects, .. } => *effects = Some(list),
            Self::Passive(_) => {}
        }
        self
    }

    #[must_use]
    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        if let Self::Triggered { insert_mode, .. } = &mut self {
            *insert_mode = mode;
        }
        self
    }

    #[must_use]
    pub fn is_passive(&self) -> bool {
        matches!(self, Self::Passive(_))
    }

    fn effects(&self) -> Option<&[Effect]> {
        match self {
            Self::Triggered { effects, .. } | Self::Activated { effects, .. } => effects.as_deref(),
            Self::Passive(_) => None,
        }
    }
}

/// The ability registry.
///
/// ```
/// use realm_engine::abilities::{AbilityHandler, AbilityRegistry, Effect, EffectTarget};
/// use realm_engine::triggers::TriggerCondition;
///
/// let mut registry = AbilityRegistry::with_builtins();
/// registry.register(
///     "Lifelink",
///     AbilityHandler::triggered(TriggerCondition::Strikes)
///         .with_effects(vec![Effect::gain_life(EffectTarget::Controller, 1)]),
/// );
///
/// let rules = registry.tokenize("Airborne, Lifelink");
/// assert!(rules.has("lifelink"));
/// assert!(registry.capabilities(&rules.abilities).is_airborne);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AbilityRegistry {
    handlers: FxHashMap<String, AbilityHandler>,
}

impl AbilityRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the standard keywords.
    ///
    /// Genesis, Deathrite and tap abilities carry no effects of their own:
    /// what they do is card-specific, so they ask for a ruling unless a
    /// more specific handler or an earlier ruling covers them.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (key, capability) in PASSIVE_KEYWORDS {
            registry.register(key, AbilityHandler::Passive(capability));
        }
        registry.register(GENESIS, AbilityHandler::triggered(TriggerCondition::EntersRealm));
        registry.register(DEATHRITE, AbilityHandler::triggered(TriggerCondition::Dies));
        registry.register(TAP, AbilityHandler::activated(ActivationCost::Tap));
        registry
    }

    /// Bind a keyword. Returns the handler it replaced, if any.
    pub fn register(&mut self, keyword: &str, handler: AbilityHandler) -> Option<AbilityHandler> {
        let key = keyword::normalize(keyword);
        tracing::debug!(keyword = %key, passive = handler.is_passive(), "ability registered");
        self.handlers.insert(key, handler)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AbilityHandler> {
        self.handlers.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Split rules text into registered keywords and a free-text remainder.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> RulesText {
        keyword::tokenize(text, |key| self.contains(key))
    }

    /// Flags granted by the passive abilities among `abilities`.
    #[must_use]
    pub fn capabilities<S: AsRef<str>>(&self, abilities: &[S]) -> CardFlags {
        CardFlags::from_capabilities(abilities.iter().filter_map(|key| match self.get(key.as_ref()) {
            Some(AbilityHandler::Passive(capability)) => Some(*capability),
            _ => None,
        }))
    }

    /// Resolve a storyline event.
    ///
    /// A ruling already recorded for this card and ability wins over the
    /// handler. Otherwise the handler's effects are applied. When neither
    /// exists the state is left untouched and a ruling is requested.
    pub fn resolve(&self, event: &StorylineEvent, state: &mut GameState) -> Result<(), EngineError> {
        let source_name = state
            .card(event.source)
            .map_or_else(|| event.source.to_string(), |c| c.name().to_string());

        if let Some(ruling) = state.rulings.get(&source_name, &event.ability).cloned() {
            EffectResolver::apply(state, event, ruling.effects())?;
            tracing::info!(event = %event.id, ability = %event.ability, card = %source_name, "ruling applied");
            state.log(LogEntry::RulingApplied {
                event: event.id,
                ability: event.ability.clone(),
                source_name,
            });
            return Ok(());
        }

        let reason = match self.get(&event.ability) {
            None => "no handler is registered for this ability",
            Some(AbilityHandler::Passive(_)) => "passive abilities are not queued",
            Some(handler) => match handler.effects() {
                Some(effects) => {
                    EffectResolver::apply(state, event, effects)?;
                    return Ok(());
                }
                None => "the effect is only described in rules text",
            },
        };

        tracing::warn!(event = %event.id, ability = %event.ability, card = %source_name, reason, "ruling required");
        Err(RulingRequired {
            event: event.id,
            ability: event.ability.clone(),
            source_name,
            reason: reason.to_string(),
        }
        .into())
    }
}
