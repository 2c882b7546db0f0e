//! Catalog boundary input.
//!
//! The card dataset is produced by an external collaborator and handed to
//! the engine as plain data. `CatalogEntry` mirrors that shape so hosts can
//! deserialize it directly, then converts into a `CardDefinition`.

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardId, CardType, MovementKind};
use super::element::{Element, Thresholds};

/// A field the dataset writes either as a single value or as a list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// One card as the external dataset describes it.
///
/// ```
/// use realm_engine::cards::{CardId, CardType, CatalogEntry};
///
/// let json = r#"{
///     "name": "Blood Ravens",
///     "type": "Minion",
///     "elements": "Air",
///     "subTypes": "Beast",
///     "rulesText": "Airborne",
///     "cost": 1, "attack": 1, "defence": 1, "life": null,
///     "thresholds": { "air": 1, "earth": 0, "fire": 0, "water": 0 }
/// }"#;
/// let entry: CatalogEntry = serde_json::from_str(json).unwrap();
/// let card = entry.into_definition(CardId::new(7));
/// assert_eq!(card.card_type, CardType::Minion);
/// assert_eq!(card.thresholds.air, 1);
/// assert_eq!(card.subtypes, vec!["Beast".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub card_type: CardType,

    #[serde(default)]
    pub elements: OneOrMany<Element>,

    #[serde(default)]
    pub sub_types: OneOrMany<String>,

    #[serde(default)]
    pub rules_text: Option<String>,

    #[serde(default)]
    pub cost: Option<u32>,

    #[serde(default)]
    pub attack: Option<u32>,

    #[serde(default)]
    pub defence: Option<u32>,

    #[serde(default)]
    pub life: Option<u32>,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Not in the printed dataset; hosts may supply it for unusual movers.
    #[serde(default)]
    pub movement: Option<u32>,

    #[serde(default)]
    pub range: Option<u32>,
}

impl CatalogEntry {
    /// Convert into a definition. Missing stats default to zero.
    #[must_use]
    pub fn into_definition(self, id: CardId) -> CardDefinition {
        let mut card = CardDefinition::new(id, self.name, self.card_type)
            .with_cost(self.cost.unwrap_or(0))
            .with_stats(self.attack.unwrap_or(0), self.defence.unwrap_or(0))
            .with_thresholds(self.thresholds)
            .with_rules_text(self.rules_text.unwrap_or_default())
            .with_movement(self.movement.unwrap_or(1), MovementKind::Adjacent)
            .with_range(self.range.unwrap_or(1));
        if let Some(life) = self.life {
            card = card.with_life(life);
        }

        let subtypes = self.sub_types.into_vec();
        let subtypes = subtypes.iter().flat_map(|s| s.split(',')).map(str::trim).filter(|s| !s.is_empty());
        let card = self.elements.into_vec().into_iter().fold(card, CardDefinition::with_element);
        subtypes.fold(card, CardDefinition::with_subtype)
    }
}
