//! Game state and its public snapshot.
//!
//! ## GameState
//!
//! The single owner of everything a game holds:
//! - Board, card instances, zones
//! - Both players' resources
//! - The storyline and rulings given so far
//! - RNG, the journal, pending game events, action history
//!
//! All mutation goes through methods that keep the zone manager, the board
//! and each `CardInstance` in agreement. [`GameState::check_invariants`]
//! verifies that agreement.
//!
//! ## PublicState
//!
//! A serializable snapshot for presentation collaborators: phase, turn,
//! resources, zone sizes, runtime state of every public card, and the
//! storyline contents.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, PlayerAction};
use super::config::EngineConfig;
use super::entity::EntityId;
use super::error::{EngineError, IllegalAction, InvariantViolation};
use super::log::LogEntry;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::abilities::{AbilityRegistry, RulingBook};
use crate::board::{Board, Coord, Position, Region};
use crate::cards::{CardDefinition, CardFlags, CardInstance, CardLookup, CardType, TapOutcome, Thresholds};
use crate::storyline::{QueueState, StorylineEvent, StorylineQueue};
use crate::triggers::GameEvent;
use crate::turn::Phase;
use crate::zones::{Pile, Zone, ZoneManager, ZonePosition};

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: EngineConfig,

    /// Turn number, 0 during setup.
    pub turn: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    pub phase: Phase,

    pub players: PlayerMap<Player>,

    pub board: Board,

    pub zones: ZoneManager,

    pub storyline: StorylineQueue,

    pub rulings: RulingBook,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Card instances by entity ID.
    cards: FxHashMap<EntityId, CardInstance>,

    log: Vector<LogEntry>,

    /// Events since triggers were last collected.
    events: Vec<GameEvent>,

    history: Vector<ActionRecord>,

    next_entity: u32,
}

impl GameState {
    /// Create an empty game: blank board, no cards, players at starting life.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let life = config.starting_life;
        Self {
            turn: 0,
            active_player: PlayerId::new(0),
            phase: Phase::Setup,
            players: PlayerMap::new(|id| Player::new(id, life)),
            board: Board::new(),
            zones: ZoneManager::new(),
            storyline: StorylineQueue::new(),
            rulings: RulingBook::new(),
            rng: GameRng::new(config.seed),
            cards: FxHashMap::default(),
            log: Vector::new(),
            events: Vec::new(),
            history: Vector::new(),
            next_entity: EntityId::FIRST_CARD,
            config,
        }
    }

    // === Cards ===

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    /// Create a card instance in `zone`, on top.
    ///
    /// Rules text is tokenized against `registry`; passive abilities become
    /// flags. Sites remember the atlas as their home pile, other non-avatar
    /// cards the spellbook.
    pub fn create_card(
        &mut self,
        definition: Arc<CardDefinition>,
        owner: PlayerId,
        zone: Zone,
        registry: &AbilityRegistry,
    ) -> Result<EntityId, InvariantViolation> {
        let entity = self.alloc_entity();
        let rules = registry.tokenize(&definition.rules_text);
        let flags = registry.capabilities(&rules.abilities);
        let home = match definition.card_type {
            CardType::Site => Some(Pile::Atlas),
            CardType::Avatar => None,
            _ => Some(Pile::Spellbook),
        };

        self.zones.add(entity, owner, zone, ZonePosition::Top)?;
        if let Some(pile) = home {
            self.zones.set_home(entity, pile);
        }

        let card = CardInstance::new(entity, definition, owner, zone).with_abilities(
            rules.abilities.into_vec(),
            rules.remainder,
            flags,
        );
        self.cards.insert(entity, card);
        Ok(entity)
    }

    #[must_use]
    pub fn card(&self, entity: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity)
    }

    pub fn card_mut(&mut self, entity: EntityId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&entity)
    }

    /// Look up a card for an action.
    pub fn require_card(&self, entity: EntityId) -> Result<&CardInstance, IllegalAction> {
        self.cards.get(&entity).ok_or(IllegalAction::CardNotFound(entity))
    }

    /// All card instances, in entity order.
    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        let mut cards: Vec<_> = self.cards.values().collect();
        cards.sort_unstable_by_key(|c| c.entity);
        cards.into_iter()
    }

    /// Cards on the realm, in entity order.
    #[must_use]
    pub fn realm_cards(&self) -> Vec<EntityId> {
        let mut cards: Vec<_> = self.cards.values().filter(|c| c.is_on_realm()).map(|c| c.entity).collect();
        cards.sort_unstable();
        cards
    }

    /// Zone a card is in.
    #[must_use]
    pub fn zone_of(&self, entity: EntityId) -> Option<Zone> {
        self.zones.zone_of(entity).map(|(_, zone)| zone)
    }

    /// The player's avatar, if it is on the realm.
    #[must_use]
    pub fn avatar(&self, player: PlayerId) -> Option<&CardInstance> {
        self.realm_cards()
            .into_iter()
            .filter_map(|e| self.card(e))
            .find(|c| c.card_type() == CardType::Avatar && c.controller == player)
    }

    /// Cells holding a site the player controls.
    #[must_use]
    pub fn sites_of(&self, player: PlayerId) -> Vec<Coord> {
        self.board
            .iter()
            .filter(|(_, location)| {
                location
                    .site
                    .and_then(|site| self.card(site))
                    .is_some_and(|site| site.controller == player)
            })
            .map(|(at, _)| at)
            .collect()
    }

    #[must_use]
    pub fn region_at(&self, at: Coord) -> Region {
        self.board.location(at).map_or(Region::Void, |l| l.region)
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// Refill mana and thresholds from the sites the player controls.
    pub fn recompute_resources(&mut self, player: PlayerId) {
        let mut thresholds = Thresholds::default();
        let sites = self.sites_of(player);
        for at in &sites {
            if let Some(site) = self.board.location(*at).and_then(|l| l.site).and_then(|s| self.card(s)) {
                thresholds.add(&site.definition.thresholds);
            }
        }
        let p = &mut self.players[player];
        p.mana = sites.len() as u32;
        p.thresholds = thresholds;
        tracing::debug!(player = %player, mana = p.mana, ?thresholds, "resources recomputed");
    }

    // === Journal, events, history ===

    /// Append a journal entry.
    pub fn log(&mut self, entry: LogEntry) {
        self.log.push_back(entry);
    }

    /// Everything that has happened, oldest first.
    #[must_use]
    pub fn journal(&self) -> &Vector<LogEntry> {
        &self.log
    }

    /// Record a game event for trigger collection.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Record an action in history.
    pub fn record_action(&mut self, player: PlayerId, action: PlayerAction) {
        let sequence = self.history.len() as u32;
        self.history.push_back(ActionRecord::new(player, action, self.turn, sequence));
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Zone transitions ===

    /// Move a card to another zone, keeping board and instance in sync.
    ///
    /// A card leaving the realm is taken off the board and loses its
    /// runtime state.
    pub fn move_card(
        &mut self,
        entity: EntityId,
        player: PlayerId,
        zone: Zone,
        position: ZonePosition,
    ) -> Result<(), InvariantViolation> {
        let card = self.cards.get_mut(&entity).ok_or(InvariantViolation::UnknownEntity(entity))?;
        self.zones
            .move_to(entity, player, zone, position)
            .ok_or(InvariantViolation::UntrackedEntity(entity))?;

        if card.zone == Zone::Realm && zone != Zone::Realm {
            self.board.remove(entity);
            card.leave_realm();
        }
        card.zone = zone;
        card.controller = player;
        Ok(())
    }

    /// Put a card from anywhere onto the realm under its controller.
    ///
    /// Water sites turn their cell underwater. Emits `EnteredRealm`.
    pub fn put_onto_realm(&mut self, entity: EntityId, position: Position) -> Result<(), EngineError> {
        let card = self.require_card(entity)?;
        let controller = card.controller;
        if !self.zones.contains(entity) {
            return Err(InvariantViolation::UntrackedEntity(entity).into());
        }
        match position {
            Position::Site(at) => {
                let region = if card.definition.is_water_site() { Region::Underwater } else { Region::Surface };
                self.board.place_site(at, entity, region)?;
            }
            _ => self.board.place(entity, position)?,
        }

        let region = self.region_at(position.coord());
        self.zones
            .move_to(entity, controller, Zone::Realm, ZonePosition::Top)
            .ok_or(InvariantViolation::UntrackedEntity(entity))?;
        if let Some(card) = self.cards.get_mut(&entity) {
            card.zone = Zone::Realm;
            card.position = Some(position);
            card.refresh_terrain(region);
        }

        self.emit(GameEvent::EnteredRealm { card: entity });
        self.log(LogEntry::Played { player: controller, card: entity, position });
        Ok(())
    }

    /// Move a card already on the realm. Emits `Moved`.
    pub fn relocate(&mut self, entity: EntityId, to: Position) -> Result<(), IllegalAction> {
        let from = self
            .card(entity)
            .and_then(|c| c.position)
            .ok_or(IllegalAction::NotOnRealm(entity))?;

        self.board.remove(entity);
        if let Err(err) = self.board.place(entity, to) {
            self.board.place(entity, from)?;
            return Err(err);
        }

        let region = self.region_at(to.coord());
        if let Some(card) = self.cards.get_mut(&entity) {
            card.position = Some(to);
            card.refresh_terrain(region);
        }
        self.emit(GameEvent::Moved { card: entity, from, to });
        self.log(LogEntry::Moved { card: entity, from, to });
        Ok(())
    }

    /// Draw the top card of a pile into hand.
    pub fn draw(&mut self, player: PlayerId, pile: Pile) -> Result<EntityId, IllegalAction> {
        let card = self.zones.draw(player, pile)?;
        if let Some(instance) = self.cards.get_mut(&card) {
            instance.zone = Zone::Hand;
        }
        tracing::debug!(player = %player, ?pile, card = %card, "drew");
        self.log(LogEntry::Drew { player, pile, card });
        Ok(card)
    }

    /// Keep every instance's zone in line with the zone manager after a
    /// bulk pile operation.
    pub fn sync_zones(&mut self) {
        for (entity, _, zone) in self.zones.iter() {
            if let Some(card) = self.cards.get_mut(&entity) {
                card.zone = zone;
            }
        }
    }

    // === Combat state ===

    /// Tap or untap a card on the realm.
    pub fn set_tapped(&mut self, entity: EntityId, tapped: bool) -> Option<TapOutcome> {
        let card = self.cards.get_mut(&entity)?;
        let outcome = if tapped { card.apply_tap() } else { card.apply_untap() };
        let entry = if tapped {
            LogEntry::Tapped { card: entity, outcome }
        } else {
            LogEntry::Untapped { card: entity, outcome }
        };
        self.log(entry);
        Some(outcome)
    }

    /// Deal damage to a player or a card.
    ///
    /// Avatars pass damage to their controller's life. Minions mark it.
    /// Other cards ignore it.
    pub fn apply_damage(&mut self, entity: EntityId, amount: u32) {
        if amount == 0 {
            return;
        }
        let player = match entity.as_player() {
            Some(player) => Some(player),
            None => match self.cards.get_mut(&entity) {
                Some(card) if card.card_type() == CardType::Avatar => Some(card.controller),
                Some(card) if card.card_type() == CardType::Minion => {
                    card.damage += amount;
                    self.log.push_back(LogEntry::Damaged { card: entity, amount });
                    None
                }
                _ => None,
            },
        };

        if let Some(player) = player {
            let p = &mut self.players[player];
            p.lose_life(amount);
            let life = p.life;
            tracing::debug!(player = %player, amount, life, "life lost");
            self.log(LogEntry::LifeChanged { player, life });
        }
    }

    /// Send a card on the realm to its owner's cemetery. Emits `Died`.
    ///
    /// Avatars cannot be destroyed. Cards off the realm are left alone.
    pub fn destroy(&mut self, entity: EntityId) -> Result<(), InvariantViolation> {
        let Some(card) = self.card(entity) else {
            return Ok(());
        };
        if !card.is_on_realm() || card.card_type() == CardType::Avatar {
            return Ok(());
        }
        let owner = card.owner;
        self.move_card(entity, owner, Zone::Cemetery, ZonePosition::Top)?;
        tracing::debug!(card = %entity, "died");
        self.emit(GameEvent::Died { card: entity });
        self.log(LogEntry::Died { card: entity });
        Ok(())
    }

    /// Destroy every minion whose damage has reached its defence.
    pub fn check_deaths(&mut self) -> Result<(), InvariantViolation> {
        let dead: Vec<_> = self
            .realm_cards()
            .into_iter()
            .filter(|&e| self.card(e).is_some_and(CardInstance::is_destroyed))
            .collect();
        for entity in dead {
            self.destroy(entity)?;
        }
        Ok(())
    }

    /// Clear damage and end-of-turn modifiers on every card.
    pub fn end_turn_cleanup(&mut self) {
        for card in self.cards.values_mut() {
            card.end_turn_cleanup();
        }
    }

    // === Snapshots and validation ===

    /// Public snapshot for presentation.
    #[must_use]
    pub fn public_state(&self) -> PublicState {
        let players = PlayerMap::new(|id| {
            let p = &self.players[id];
            PlayerView {
                id,
                life: p.life,
                mana: p.mana,
                thresholds: p.thresholds,
                hand: self.zones.size(id, Zone::Hand),
                atlas: self.zones.size(id, Zone::Atlas),
                spellbook: self.zones.size(id, Zone::Spellbook),
                cemetery: self.zones.size(id, Zone::Cemetery),
            }
        });

        let cards = self
            .cards()
            .filter(|c| matches!(c.zone, Zone::Realm | Zone::Cemetery))
            .map(CardView::from)
            .collect();

        PublicState {
            turn: self.turn,
            phase: self.phase,
            active_player: self.active_player,
            players,
            cards,
            storyline: self.storyline.iter().cloned().collect(),
            queue_state: self.storyline.state(),
        }
    }

    /// Verify that board, zones, instances and players agree.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.board.validate()?;
        self.zones.validate()?;

        for card in self.cards() {
            let (_, zone) = self
                .zones
                .zone_of(card.entity)
                .ok_or(InvariantViolation::UntrackedEntity(card.entity))?;
            if zone != card.zone {
                return Err(InvariantViolation::PositionMismatch(card.entity));
            }
            let on_board = self.board.locate(card.entity);
            let expected = if zone == Zone::Realm { card.position } else { None };
            if on_board != expected {
                return Err(InvariantViolation::PositionMismatch(card.entity));
            }
        }

        let sites = self.board.iter().filter_map(|(_, l)| l.site);
        for entity in self.board.occupants().chain(sites) {
            if !self.cards.contains_key(&entity) {
                return Err(InvariantViolation::UnknownEntity(entity));
            }
        }

        for (id, player) in self.players.iter() {
            if player.life < 0 {
                return Err(InvariantViolation::LifeBelowFloor { player: id, life: player.life });
            }
        }
        Ok(())
    }
}

impl CardLookup for GameState {
    fn card(&self, entity: EntityId) -> Option<&CardInstance> {
        self.cards.get(&entity)
    }
}

/// One player's public resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub life: i32,
    pub mana: u32,
    pub thresholds: Thresholds,
    pub hand: usize,
    pub atlas: usize,
    pub spellbook: usize,
    pub cemetery: usize,
}

/// Runtime state of a public card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub entity: EntityId,
    pub name: String,
    pub owner: PlayerId,
    pub controller: PlayerId,
    pub zone: Zone,
    pub position: Option<Position>,
    pub flags: CardFlags,
    pub damage: u32,
}

impl From<&CardInstance> for CardView {
    fn from(card: &CardInstance) -> Self {
        Self {
            entity: card.entity,
            name: card.name().to_string(),
            owner: card.owner,
            controller: card.controller,
            zone: card.zone,
            position: card.position,
            flags: card.flags,
            damage: card.damage,
        }
    }
}

/// Observable game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    pub turn: u32,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub players: PlayerMap<PlayerView>,
    /// Cards on the realm and in cemeteries, in entity order.
    pub cards: Vec<CardView>,
    /// Queued storyline events, head first.
    pub storyline: Vec<StorylineEvent>,
    pub queue_state: QueueState,
}
