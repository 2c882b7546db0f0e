//! Card registry for definition lookup.
//!
//! The `CardRegistry` stores every catalog definition for a game, keyed by
//! `CardId` and by name. Deck lists refer to cards by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::catalog::CatalogEntry;
use super::definition::{CardDefinition, CardId};
use crate::core::InvariantViolation;

/// Registry of card definitions.
///
/// ```
/// use realm_engine::cards::{CardDefinition, CardId, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// let id = registry
///     .register(CardDefinition::new(CardId::new(1), "Lone Tower", CardType::Site))
///     .unwrap();
///
/// assert_eq!(registry.get(id).unwrap().name, "Lone Tower");
/// assert_eq!(registry.by_name("Lone Tower").map(|c| c.id), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    names: FxHashMap<String, CardId>,
    next_id: u32,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Ids and names must both be unique.
    pub fn register(&mut self, card: CardDefinition) -> Result<CardId, InvariantViolation> {
        if self.cards.contains_key(&card.id) || self.names.contains_key(&card.name) {
            return Err(InvariantViolation::DuplicateCatalogEntry(card.name));
        }
        let id = card.id;
        self.next_id = self.next_id.max(id.raw() + 1);
        self.names.insert(card.name.clone(), id);
        self.cards.insert(id, Arc::new(card));
        Ok(id)
    }

    /// Register a dataset entry under the next free id.
    pub fn register_entry(&mut self, entry: CatalogEntry) -> Result<CardId, InvariantViolation> {
        let id = CardId::new(self.next_id);
        self.register(entry.into_definition(id))
    }

    /// Register a whole dataset.
    pub fn load(&mut self, entries: impl IntoIterator<Item = CatalogEntry>) -> Result<(), InvariantViolation> {
        for entry in entries {
            self.register_entry(entry)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.names.get(name).and_then(|id| self.cards.get(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.cards.get(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        let card = CardDefinition::new(CardId::new(1), "Test Card", CardType::Minion);
        registry.register(card).unwrap();

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Test Card");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::new(CardId::new(1), "Twin", CardType::Minion))
            .unwrap();
        let err = registry
            .register(CardDefinition::new(CardId::new(2), "Twin", CardType::Minion))
            .unwrap_err();

        assert_eq!(err, InvariantViolation::DuplicateCatalogEntry("Twin".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_entry_assigns_ids() {
        let mut registry = CardRegistry::new();
        registry
            .register(CardDefinition::new(CardId::new(4), "Fixed", CardType::Site))
            .unwrap();

        let entry: CatalogEntry = serde_json::from_str(r#"{ "name": "Loaded", "type": "Aura" }"#).unwrap();
        let id = registry.register_entry(entry).unwrap();
        assert_eq!(id, CardId::new(5));

        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Fixed", "Loaded"]);
    }
}
