//! Zone system for card locations.
//!
//! Each player has an atlas (sites), a spellbook (everything else), a hand,
//! a cemetery and the realm (cards on the board).
//!
//! ## Key Types
//!
//! - `Zone`: one of a player's five zones
//! - `Pile`: the two draw piles
//! - `ZoneManager`: card location tracking, movement and deck operations
//! - `ZonePosition`: position specifier for inserting into a zone

pub mod deck;
pub mod manager;

pub use manager::{Pile, Zone, ZoneManager, ZonePosition};
