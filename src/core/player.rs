//! Player identification, per-player storage and player resources.
//!
//! ## PlayerId
//!
//! The game is strictly two-player. `PlayerId::opponent()` is the only
//! turn-order primitive the rules need.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a fixed array, indexed by `PlayerId`.
//!
//! ## Player
//!
//! Life, mana pool and elemental thresholds. Hand, cemetery and piles are
//! zones tracked by the `ZoneManager`, not stored here.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::Thresholds;

/// Number of players in a game.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier (0 or 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in seat order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use realm_engine::core::{PlayerId, PlayerMap};
///
/// let mut life: PlayerMap<i32> = PlayerMap::with_value(20);
/// life[PlayerId::new(1)] -= 3;
/// assert_eq!(life[PlayerId::new(0)], 20);
/// assert_eq!(life[PlayerId::new(1)], 17);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player's resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Life total. Damage saturates at 0; 0 or less loses the game.
    pub life: i32,

    /// Mana pool, refilled at the start of the player's turn.
    pub mana: u32,

    /// Elemental thresholds provided by controlled sites.
    pub thresholds: Thresholds,

    /// Mulligans taken during setup.
    pub mulligans: u32,
}

impl Player {
    /// Create a player with the given starting life.
    #[must_use]
    pub fn new(id: PlayerId, life: i32) -> Self {
        Self {
            id,
            life,
            mana: 0,
            thresholds: Thresholds::default(),
            mulligans: 0,
        }
    }

    /// Reduce life, never below zero. Returns the life actually lost.
    pub fn lose_life(&mut self, amount: u32) -> u32 {
        let lost = i32::try_from(amount).unwrap_or(i32::MAX).min(self.life.max(0));
        self.life -= lost;
        lost.unsigned_abs()
    }

    /// Increase life.
    pub fn gain_life(&mut self, amount: u32) {
        self.life = self.life.saturating_add(i32::try_from(amount).unwrap_or(i32::MAX));
    }

    /// Spend mana if the pool covers `cost`.
    pub fn spend_mana(&mut self, cost: u32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }
}
