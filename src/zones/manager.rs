//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` tracks which player's zone each card is in and keeps
//! every zone ordered (index 0 is the bottom, the last index is the top).
//! A card is tracked in exactly one zone at a time; moving it is the only
//! way to change that.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, GameRng, InvariantViolation, PlayerId};

/// A player's zones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// Site draw pile.
    Atlas,
    /// Spell draw pile.
    Spellbook,
    Hand,
    Cemetery,
    /// On the board.
    Realm,
}

/// The two draw piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Atlas,
    Spellbook,
}

impl Pile {
    #[must_use]
    pub fn zone(self) -> Zone {
        match self {
            Pile::Atlas => Zone::Atlas,
            Pile::Spellbook => Zone::Spellbook,
        }
    }

    #[must_use]
    pub fn other(self) -> Pile {
        match self {
            Pile::Atlas => Pile::Spellbook,
            Pile::Spellbook => Pile::Atlas,
        }
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    Top,
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Manages card locations across both players' zones.
///
/// ```
/// use realm_engine::core::{EntityId, PlayerId};
/// use realm_engine::zones::{Zone, ZoneManager, ZonePosition};
///
/// let mut zones = ZoneManager::new();
/// let p0 = PlayerId::new(0);
/// zones.add(EntityId(10), p0, Zone::Spellbook, ZonePosition::Top).unwrap();
/// zones.add(EntityId(11), p0, Zone::Spellbook, ZonePosition::Bottom).unwrap();
///
/// assert_eq!(zones.cards(p0, Zone::Spellbook), &[EntityId(11), EntityId(10)]);
/// assert!(zones.add(EntityId(10), p0, Zone::Hand, ZonePosition::Top).is_err());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZoneManager {
    /// entity -> (player, zone)
    locations: FxHashMap<EntityId, (PlayerId, Zone)>,

    /// Ordered contents per (player, zone).
    order: FxHashMap<(PlayerId, Zone), Vec<EntityId>>,

    /// Draw pile each card returns to.
    homes: FxHashMap<EntityId, Pile>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(order: &mut Vec<EntityId>, entity: EntityId, position: ZonePosition) {
        match position {
            ZonePosition::Top => order.push(entity),
            ZonePosition::Bottom => order.insert(0, entity),
            ZonePosition::Index(i) => {
                let idx = i.min(order.len());
                order.insert(idx, entity);
            }
        }
    }

    /// Start tracking a card.
    pub fn add(
        &mut self,
        entity: EntityId,
        player: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> Result<(), InvariantViolation> {
        if self.locations.contains_key(&entity) {
            return Err(InvariantViolation::ZoneDoubleOwnership(entity));
        }
        self.locations.insert(entity, (player, zone));
        Self::insert(self.order.entry((player, zone)).or_default(), entity, position);
        Ok(())
    }

    /// Move a card. Returns where it was, or `None` if untracked.
    pub fn move_to(
        &mut self,
        entity: EntityId,
        player: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> Option<(PlayerId, Zone)> {
        let old = self.locations.get(&entity).copied()?;
        if let Some(order) = self.order.get_mut(&old) {
            order.retain(|&e| e != entity);
        }
        self.locations.insert(entity, (player, zone));
        Self::insert(self.order.entry((player, zone)).or_default(), entity, position);
        Some(old)
    }

    /// Stop tracking a card.
    pub fn remove(&mut self, entity: EntityId) -> Option<(PlayerId, Zone)> {
        let old = self.locations.remove(&entity)?;
        if let Some(order) = self.order.get_mut(&old) {
            order.retain(|&e| e != entity);
        }
        Some(old)
    }

    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<(PlayerId, Zone)> {
        self.locations.get(&entity).copied()
    }

    #[must_use]
    pub fn is_in(&self, entity: EntityId, player: PlayerId, zone: Zone) -> bool {
        self.locations.get(&entity) == Some(&(player, zone))
    }

    /// Contents of a zone, bottom to top.
    #[must_use]
    pub fn cards(&self, player: PlayerId, zone: Zone) -> &[EntityId] {
        self.order.get(&(player, zone)).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn size(&self, player: PlayerId, zone: Zone) -> usize {
        self.cards(player, zone).len()
    }

    #[must_use]
    pub fn top(&self, player: PlayerId, zone: Zone) -> Option<EntityId> {
        self.cards(player, zone).last().copied()
    }

    pub fn shuffle(&mut self, player: PlayerId, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.order.get_mut(&(player, zone)) {
            rng.shuffle(order);
        }
    }

    /// Record which pile a card returns to.
    pub fn set_home(&mut self, entity: EntityId, pile: Pile) {
        self.homes.insert(entity, pile);
    }

    #[must_use]
    pub fn home(&self, entity: EntityId) -> Option<Pile> {
        self.homes.get(&entity).copied()
    }

    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Every tracked (entity, player, zone).
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, PlayerId, Zone)> + '_ {
        self.locations.iter().map(|(&e, &(p, z))| (e, p, z))
    }

    /// Check that the index and the ordered lists agree.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut listed = 0;
        for (&key, order) in &self.order {
            for &entity in order {
                listed += 1;
                if self.locations.get(&entity) != Some(&key) {
                    return Err(InvariantViolation::ZoneDoubleOwnership(entity));
                }
            }
        }
        if listed != self.locations.len() {
            let missing = self
                .locations
                .keys()
                .copied()
                .find(|e| {
                    let key = self.locations[e];
                    !self.cards(key.0, key.1).contains(e)
                });
            if let Some(entity) = missing {
                return Err(InvariantViolation::UntrackedEntity(entity));
            }
        }
        Ok(())
    }
}
