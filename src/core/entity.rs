//! Entity identification system.
//!
//! Every card instance in a game has a unique `EntityId`. Players are
//! entities too, so effects can target "a player or a card" uniformly.
//!
//! ## ID Layout
//!
//! - `0..2`: Reserved for the two players
//! - `2..`: Card instances, allocated in creation order
//!
//! ```
//! use realm_engine::core::{EntityId, PlayerId};
//!
//! let p1 = EntityId::player(PlayerId::new(1));
//! assert!(p1.is_player());
//! assert_eq!(p1.as_player(), Some(PlayerId::new(1)));
//!
//! let card = EntityId(10);
//! assert!(!card.is_player());
//! ```

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PLAYER_COUNT};

/// Unique identifier for any game entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// First entity ID available for card instances.
    pub const FIRST_CARD: u32 = PLAYER_COUNT as u32;

    /// Entity ID for a player.
    #[must_use]
    pub const fn player(id: PlayerId) -> Self {
        Self(id.0 as u32)
    }

    /// Check if this entity ID refers to a player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 < Self::FIRST_CARD
    }

    /// Convert to `PlayerId` if this is a player entity.
    #[must_use]
    pub fn as_player(self) -> Option<PlayerId> {
        if self.is_player() {
            Some(PlayerId::new(self.0 as u8))
        } else {
            None
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}
