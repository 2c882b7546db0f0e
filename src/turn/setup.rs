//! Game setup: building decks from the catalog and dealing opening hands.

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityRegistry;
use crate::board::{Coord, Layer, Position};
use crate::cards::{CardRegistry, CardType};
use crate::core::{EngineError, GameState, InvariantViolation, PlayerId, PlayerMap};
use crate::zones::{Pile, Zone};

/// Where each player's avatar starts.
pub const AVATAR_START: [Coord; 2] = [Coord::new(4, 1), Coord::new(0, 2)];

/// A deck as catalog card names.
///
/// Sites go to the atlas, the avatar onto the board, everything else to the
/// spellbook. Exactly one avatar is required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckList {
    pub cards: Vec<String>,
}

impl DeckList {
    #[must_use]
    pub fn new<S: Into<String>>(cards: impl IntoIterator<Item = S>) -> Self {
        Self {
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }

    /// Add `count` copies of a card.
    #[must_use]
    pub fn with(mut self, name: &str, count: usize) -> Self {
        self.cards.extend(std::iter::repeat(name.to_string()).take(count));
        self
    }
}

/// Create every card, place avatars, shuffle both piles and deal opening hands.
pub(crate) fn deal(
    state: &mut GameState,
    catalog: &CardRegistry,
    registry: &AbilityRegistry,
    decks: &PlayerMap<DeckList>,
) -> Result<(), InvariantViolation> {
    for (player, deck) in decks.iter() {
        let mut avatars = Vec::new();
        for name in &deck.cards {
            let definition = catalog
                .by_name(name)
                .ok_or_else(|| InvariantViolation::UnknownCard(name.clone()))?;
            let zone = match definition.card_type {
                CardType::Site => Zone::Atlas,
                CardType::Avatar => Zone::Hand,
                _ => Zone::Spellbook,
            };
            let entity = state.create_card(definition.clone(), player, zone, registry)?;
            if zone == Zone::Hand {
                avatars.push(entity);
            }
        }

        let [avatar] = avatars[..] else {
            return Err(InvariantViolation::AvatarCount { player, count: avatars.len() });
        };
        let start = AVATAR_START[player.index()];
        state
            .put_onto_realm(avatar, Position::Location { at: start, layer: Layer::Surface })
            .map_err(|err| match err {
                EngineError::InvariantViolation(violation) => violation,
                _ => InvariantViolation::PositionMismatch(avatar),
            })?;
    }
    // Avatars entering the realm at setup do not trigger.
    state.take_events();

    for player in PlayerId::both() {
        state.zones.shuffle(player, Zone::Atlas, &mut state.rng);
        state.zones.shuffle(player, Zone::Spellbook, &mut state.rng);
        let (sites, spells) = (state.config.opening_sites, state.config.opening_spells);
        state.zones.draw_many(player, Pile::Atlas, sites);
        state.zones.draw_many(player, Pile::Spellbook, spells);
    }
    state.sync_zones();
    tracing::info!(seed = state.rng.seed(), "game dealt");
    Ok(())
}
