//! Deck operations over the draw piles.
//!
//! A player's library is their atlas plus their spellbook. Draws take from
//! the top of one pile; cards returned to a library go to the bottom of
//! their home pile, which is then shuffled.

use smallvec::SmallVec;

use super::manager::{Pile, Zone, ZoneManager, ZonePosition};
use crate::core::{EntityId, GameRng, IllegalAction, PlayerId};

impl ZoneManager {
    /// Draw the top card of a pile into hand.
    pub fn draw(&mut self, player: PlayerId, pile: Pile) -> Result<EntityId, IllegalAction> {
        let entity = self.top(player, pile.zone()).ok_or(IllegalAction::PileEmpty)?;
        self.move_to(entity, player, Zone::Hand, ZonePosition::Top);
        Ok(entity)
    }

    /// Draw up to `count` cards from a pile. Stops early if it runs out.
    pub fn draw_many(&mut self, player: PlayerId, pile: Pile, count: usize) -> SmallVec<[EntityId; 8]> {
        (0..count).map_while(|_| self.draw(player, pile).ok()).collect()
    }

    /// Cards left in both piles.
    #[must_use]
    pub fn library_size(&self, player: PlayerId) -> usize {
        self.size(player, Zone::Atlas) + self.size(player, Zone::Spellbook)
    }

    /// Put a card on the bottom of its home pile and shuffle that pile.
    ///
    /// The card goes to its owner's pile, given as `owner`.
    pub fn return_to_pile(&mut self, entity: EntityId, owner: PlayerId, rng: &mut GameRng) -> Option<Pile> {
        let pile = self.home(entity)?;
        self.move_to(entity, owner, pile.zone(), ZonePosition::Bottom)?;
        self.shuffle(owner, pile.zone(), rng);
        Some(pile)
    }

    /// Move the first card in a pile matching `predicate` into hand, then
    /// shuffle the pile. Searches from the top.
    pub fn search(
        &mut self,
        player: PlayerId,
        pile: Pile,
        mut predicate: impl FnMut(EntityId) -> bool,
        rng: &mut GameRng,
    ) -> Option<EntityId> {
        let found = self.cards(player, pile.zone()).iter().rev().copied().find(|&e| predicate(e));
        if let Some(entity) = found {
            self.move_to(entity, player, Zone::Hand, ZonePosition::Top);
        }
        self.shuffle(player, pile.zone(), rng);
        found
    }

    /// Return the whole hand to its piles, reshuffle both, and draw a new
    /// hand of `sites` from the atlas and `spells` from the spellbook.
    ///
    /// Returns the cards that went back. Library size is conserved.
    pub fn mulligan(
        &mut self,
        player: PlayerId,
        sites: usize,
        spells: usize,
        rng: &mut GameRng,
    ) -> Vec<EntityId> {
        let hand = self.cards(player, Zone::Hand).to_vec();
        for &entity in &hand {
            let pile = self.home(entity).unwrap_or(Pile::Spellbook);
            self.move_to(entity, player, pile.zone(), ZonePosition::Bottom);
        }
        self.shuffle(player, Zone::Atlas, rng);
        self.shuffle(player, Zone::Spellbook, rng);

        self.draw_many(player, Pile::Atlas, sites);
        self.draw_many(player, Pile::Spellbook, spells);
        hand
    }
}
