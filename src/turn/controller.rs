//! The turn controller.
//!
//! ## Turn structure
//!
//! ```text
//! Setup: mulligans (non-blocking, one decision per player)
//! Start: untap, refill mana and thresholds, start-of-turn triggers, draw
//! Main:  active player acts or passes; both passing in a row ends the phase
//! End:   end-of-turn triggers, clear damage and turn effects, pass the turn
//! ```
//!
//! Between steps the controller drains the storyline: triggers from the
//! last step are collected, placed (non-active player first) and resolved
//! from the head. Anything needing a human stops the loop with a
//! [`PendingDecision`].

use crate::abilities::{AbilityHandler, AbilityRegistry, ActivationCost, Ruling, CAST};
use crate::board::{Board, Coord, Layer, Position};
use crate::cards::{check_move, check_strike, region_allows, resolve_strike, CardInstance, CardRegistry, CardType, Combatant};
use crate::core::{
    EngineConfig, EngineError, EntityId, GameState, IllegalAction, InvariantViolation, LogEntry, PlayerAction,
    PlayerId, PlayerMap, PublicState,
};
use crate::storyline::{resolve_next, Priority, TriggerDraft};
use crate::triggers::{collect_triggers, GameEvent};
use crate::zones::{Pile, Zone, ZonePosition};

use super::decision::{Decision, PendingDecision, Progress};
use super::phase::{GameResult, Phase};
use super::setup::{deal, DeckList};

/// Where the controller is within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Mulligan(PlayerId),
    TurnStart,
    Draw,
    BeginMain,
    Main,
    TurnEnd,
    Cleanup,
}

/// Drives a game from setup to a result.
///
/// The controller is the single owner of the [`GameState`]. It runs until
/// it needs a decision, returns it, and resumes when [`TurnController::decide`]
/// supplies one.
pub struct TurnController {
    state: GameState,
    registry: AbilityRegistry,
    step: Step,
    priority: Priority,
    pending: Option<PendingDecision>,
    result: Option<GameResult>,
}

impl TurnController {
    /// Set up a game: build decks, place avatars, deal opening hands.
    pub fn new(
        config: EngineConfig,
        registry: AbilityRegistry,
        catalog: &CardRegistry,
        decks: &PlayerMap<DeckList>,
    ) -> Result<Self, InvariantViolation> {
        let mut state = GameState::new(config);
        deal(&mut state, catalog, &registry, decks)?;
        let first = state.active_player;
        Ok(Self {
            state,
            registry,
            step: Step::Mulligan(first),
            priority: Priority::new(first),
            pending: None,
            result: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn registry(&self) -> &AbilityRegistry {
        &self.registry
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingDecision> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn public_state(&self) -> PublicState {
        self.state.public_state()
    }

    /// Record a ruling ahead of time, so the ability never has to ask.
    pub fn record_ruling(&mut self, card_name: &str, ability: &str, ruling: Ruling) {
        self.state.rulings.record(card_name, ability, ruling);
    }

    /// Tear the game down. The storyline is cleared and nothing else runs.
    pub fn abort(&mut self) {
        self.state.storyline.clear();
        self.state.take_events();
        self.pending = None;
        self.finish(GameResult::Aborted);
    }

    /// Run until a decision is needed or the game ends.
    ///
    /// Corrupt state comes back as [`EngineError::InvariantViolation`] and
    /// ends nothing on its own; the host decides what to do with the game.
    pub fn progress(&mut self) -> Result<Progress, EngineError> {
        loop {
            if let Some(result) = self.result {
                return Ok(Progress::Finished(result));
            }
            if let Some(pending) = &self.pending {
                return Ok(Progress::Pending(pending.clone()));
            }
            self.run_step()?;
            if self.state.config.debug_mode {
                self.state.check_invariants()?;
            }
        }
    }

    /// Answer the pending decision and run on.
    ///
    /// A rejected decision leaves the game untouched and the same decision
    /// pending.
    pub fn decide(&mut self, player: PlayerId, decision: Decision) -> Result<Progress, EngineError> {
        if self.result.is_some() {
            return Err(IllegalAction::GameOver.into());
        }
        if decision == Decision::Action(PlayerAction::Concede) {
            self.state.log(LogEntry::Conceded { player });
            self.finish(GameResult::Winner(player.opponent()));
            return self.progress();
        }

        let pending = self.pending.clone().ok_or(IllegalAction::UnexpectedDecision)?;
        if pending.player().is_some_and(|expected| expected != player) {
            return Err(match pending {
                PendingDecision::Priority { .. } => IllegalAction::NotYourPriority(player),
                _ => IllegalAction::UnexpectedDecision,
            }
            .into());
        }

        match (pending, decision) {
            (PendingDecision::Mulligan { player }, Decision::Mulligan(take)) => self.mulligan(player, take),
            (PendingDecision::ChooseDrawPile { player }, Decision::DrawFrom(pile)) => self.draw_step(player, pile)?,
            (PendingDecision::OrderTriggers(_), Decision::OrderTriggers(order)) => {
                self.state.storyline.place(player, &order)?;
            }
            (PendingDecision::Ruling(required), Decision::Ruling(ruling)) => {
                self.state.rulings.record(&required.source_name, &required.ability, ruling);
            }
            (PendingDecision::Priority { .. }, Decision::Action(action)) => self.take_action(player, action)?,
            _ => return Err(IllegalAction::UnexpectedDecision.into()),
        }

        self.pending = None;
        self.progress()
    }

    fn finish(&mut self, result: GameResult) {
        if self.result.is_none() {
            tracing::info!(?result, turn = self.state.turn, "game over");
            self.state.log(LogEntry::GameOver(result));
            self.result = Some(result);
        }
    }

    fn check_game_over(&self) -> Option<GameResult> {
        let [p0, p1] = [PlayerId::new(0), PlayerId::new(1)].map(|p| self.state.player(p).is_defeated());
        match (p0, p1) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerId::new(1))),
            (false, true) => Some(GameResult::Winner(PlayerId::new(0))),
            (false, false) => None,
        }
    }

    /// One unit of work: a death check, trigger collection, a placement
    /// round, one storyline resolution, or one turn step.
    fn run_step(&mut self) -> Result<(), EngineError> {
        self.state.check_deaths()?;
        if let Some(result) = self.check_game_over() {
            self.finish(result);
            return Ok(());
        }

        if self.state.has_events() {
            let events = self.state.take_events();
            let drafts = collect_triggers(&events, &self.state, &self.registry);
            let active = self.state.active_player;
            self.state.storyline.collect(drafts, active);
        }

        if let Some(request) = self.state.storyline.advance_placement() {
            self.pending = Some(PendingDecision::OrderTriggers(request));
            return Ok(());
        }

        if !self.state.storyline.is_empty() {
            match resolve_next(&mut self.state, &self.registry) {
                Ok(_) => {}
                Err(EngineError::RulingRequired(required)) => {
                    self.pending = Some(PendingDecision::Ruling(required));
                }
                Err(err) => return Err(err),
            }
            return Ok(());
        }

        self.turn_step();
        Ok(())
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        let (turn, player) = (self.state.turn, self.state.active_player);
        tracing::info!(turn, player = %player, %phase, "phase");
        self.state.log(LogEntry::PhaseChanged { turn, player, phase });
    }

    fn turn_step(&mut self) {
        let active = self.state.active_player;
        match self.step {
            Step::Mulligan(player) => {
                if self.state.player(player).mulligans < self.state.config.max_mulligans {
                    self.pending = Some(PendingDecision::Mulligan { player });
                } else {
                    self.step = self.after_mulligan(player);
                }
            }

            Step::TurnStart => {
                self.state.turn += 1;
                self.enter_phase(Phase::Start);
                for entity in self.state.realm_cards() {
                    let Some(card) = self.state.card_mut(entity) else {
                        continue;
                    };
                    if card.controller != active {
                        continue;
                    }
                    card.flags.has_summoning_sickness = false;
                    if card.flags.is_tapped {
                        self.state.set_tapped(entity, false);
                    }
                }
                self.state.recompute_resources(active);
                self.state.emit(GameEvent::TurnStarted { player: active });
                self.step = Step::Draw;
            }

            Step::Draw => {
                let first_turn = self.state.turn == 1 && self.state.config.skip_first_draw;
                if first_turn {
                    self.step = Step::BeginMain;
                } else if self.state.zones.library_size(active) == 0 {
                    tracing::info!(player = %active, "cannot draw from an empty library");
                    self.finish(GameResult::Winner(active.opponent()));
                } else {
                    self.pending = Some(PendingDecision::ChooseDrawPile { player: active });
                }
            }

            Step::BeginMain => {
                self.enter_phase(Phase::Main);
                self.priority = Priority::new(active);
                self.step = Step::Main;
            }

            Step::Main => {
                self.pending = Some(PendingDecision::Priority {
                    player: self.priority.holder(),
                    phase: Phase::Main,
                });
            }

            Step::TurnEnd => {
                self.enter_phase(Phase::End);
                self.state.emit(GameEvent::TurnEnded { player: active });
                self.step = Step::Cleanup;
            }

            Step::Cleanup => {
                self.state.end_turn_cleanup();
                self.state.active_player = active.opponent();
                self.step = Step::TurnStart;
            }
        }
    }

    fn after_mulligan(&self, player: PlayerId) -> Step {
        if player == self.state.active_player {
            Step::Mulligan(player.opponent())
        } else {
            Step::TurnStart
        }
    }

    fn mulligan(&mut self, player: PlayerId, take: bool) {
        if take {
            let (sites, spells) = (self.state.config.opening_sites, self.state.config.opening_spells);
            let state = &mut self.state;
            state.zones.mulligan(player, sites, spells, &mut state.rng);
            state.sync_zones();
            state.player_mut(player).mulligans += 1;
            state.log(LogEntry::Mulligan { player });
        } else {
            self.step = self.after_mulligan(player);
        }
    }

    fn draw_step(&mut self, player: PlayerId, pile: Pile) -> Result<(), IllegalAction> {
        self.state.draw(player, pile)?;
        self.step = Step::BeginMain;
        Ok(())
    }

    // === Actions ===

    fn take_action(&mut self, player: PlayerId, action: PlayerAction) -> Result<(), EngineError> {
        if player != self.priority.holder() {
            return Err(IllegalAction::NotYourPriority(player).into());
        }
        if !self.state.storyline.is_empty() {
            return Err(IllegalAction::StorylineNotEmpty.into());
        }
        if action.is_main_phase_only() && player != self.state.active_player {
            return Err(IllegalAction::NotActivePlayer.into());
        }

        match &action {
            PlayerAction::Pass => {
                if self.priority.pass(player)? {
                    self.step = Step::TurnEnd;
                }
                return Ok(());
            }
            PlayerAction::Concede => return Ok(()),
            PlayerAction::PlaySite { card, at } => self.play_site(player, *card, *at)?,
            PlayerAction::CastSpell { card, at, target } => self.cast_spell(player, *card, *at, *target)?,
            PlayerAction::Move { card, to, layer } => self.move_unit(player, *card, *to, *layer)?,
            PlayerAction::Attack { attacker, defender } => self.attack(player, *attacker, *defender)?,
            PlayerAction::Activate { card, ability, target } => self.activate(player, *card, ability, *target)?,
        }

        tracing::debug!(player = %player, ?action, "action taken");
        self.state.record_action(player, action);
        self.priority.acted();
        Ok(())
    }

    fn own_card(&self, player: PlayerId, entity: EntityId) -> Result<&CardInstance, IllegalAction> {
        let card = self.state.require_card(entity)?;
        if card.controller != player {
            return Err(IllegalAction::NotController { player, card: entity });
        }
        Ok(card)
    }

    fn in_hand(&self, player: PlayerId, entity: EntityId) -> Result<&CardInstance, IllegalAction> {
        let card = self.own_card(player, entity)?;
        if !self.state.zones.is_in(entity, player, Zone::Hand) {
            return Err(IllegalAction::NotInHand(entity));
        }
        Ok(card)
    }

    fn target_check(&self, target: Option<EntityId>) -> Result<(), IllegalAction> {
        match target {
            Some(t) if !t.is_player() => match self.state.card(t) {
                Some(card) if card.is_on_realm() => Ok(()),
                Some(_) => Err(IllegalAction::NotOnRealm(t)),
                None => Err(IllegalAction::CardNotFound(t)),
            },
            _ => Ok(()),
        }
    }

    /// Sites are played by tapping the avatar. The first goes beneath the
    /// avatar; later ones next to a site the player already controls.
    fn play_site(&mut self, player: PlayerId, entity: EntityId, at: Coord) -> Result<(), EngineError> {
        let card = self.in_hand(player, entity)?;
        if card.card_type() != CardType::Site {
            return Err(IllegalAction::WrongCardType(entity).into());
        }
        let thresholds = card.definition.thresholds;

        let location = self.state.board.location(at).ok_or(IllegalAction::OffBoard(at))?;
        if location.has_site() {
            return Err(IllegalAction::SiteOccupied(at).into());
        }

        let avatar = self.state.avatar(player).ok_or(IllegalAction::NotOnRealm(EntityId::player(player)))?;
        if avatar.flags.is_tapped {
            return Err(IllegalAction::Tapped(avatar.entity).into());
        }
        let avatar_entity = avatar.entity;
        let avatar_at = avatar.position.map(Position::coord);

        let sites = self.state.sites_of(player);
        let connected = if sites.is_empty() {
            avatar_at == Some(at)
        } else {
            sites.iter().any(|&s| Board::are_adjacent(s, at))
        };
        if !connected {
            return Err(IllegalAction::SiteNotConnected(at).into());
        }

        self.state.put_onto_realm(entity, Position::Site(at))?;
        self.state.set_tapped(avatar_entity, true);
        let p = self.state.player_mut(player);
        p.mana += 1;
        p.thresholds.add(&thresholds);

        // The avatar may now stand on land or water.
        let region = self.state.region_at(at);
        if let Some(avatar) = self.state.card_mut(avatar_entity) {
            avatar.refresh_terrain(region);
        }
        Ok(())
    }

    fn cast_spell(
        &mut self,
        player: PlayerId,
        entity: EntityId,
        at: Option<Coord>,
        target: Option<EntityId>,
    ) -> Result<(), EngineError> {
        let card = self.in_hand(player, entity)?;
        let definition = card.definition.clone();
        let flags = card.flags;

        let position = match definition.card_type {
            CardType::Site | CardType::Avatar => return Err(IllegalAction::WrongCardType(entity).into()),
            CardType::Minion | CardType::Artifact => {
                let at = at.ok_or(IllegalAction::WrongCardType(entity))?;
                let location = self.state.board.location(at).ok_or(IllegalAction::OffBoard(at))?;
                let site = location.site.ok_or(IllegalAction::NoSite(at))?;
                if self.state.card(site).map(|s| s.controller) != Some(player) {
                    return Err(IllegalAction::NotYourSite { player, at }.into());
                }
                if !region_allows(&flags, location.region) {
                    return Err(IllegalAction::ForbiddenRegion { card: entity, region: location.region, at }.into());
                }
                Some(Position::Location { at, layer: Layer::Surface })
            }
            CardType::Aura => {
                let at = at.ok_or(IllegalAction::WrongCardType(entity))?;
                if self.state.board.intersection(at).is_none() {
                    return Err(IllegalAction::OffBoard(at).into());
                }
                Some(Position::Intersection(at))
            }
            CardType::Magic => {
                let caster = self.state.realm_cards().into_iter().filter_map(|e| self.state.card(e)).any(|c| {
                    c.controller == player
                        && !c.is_disabled()
                        && (c.card_type() == CardType::Avatar || c.flags.is_spellcaster)
                });
                if !caster {
                    return Err(IllegalAction::NoSpellcaster(player).into());
                }
                None
            }
        };
        self.target_check(target)?;

        let p = self.state.player(player);
        if p.mana < definition.cost {
            return Err(IllegalAction::InsufficientMana {
                required: definition.cost,
                available: p.mana,
            }
            .into());
        }
        if let Some((element, required, available)) = p.thresholds.shortfall(&definition.thresholds) {
            return Err(IllegalAction::ThresholdNotMet { element, required, available }.into());
        }

        // Validation done.
        match position {
            Some(position) => {
                self.state.put_onto_realm(entity, position)?;
                self.state.player_mut(player).spend_mana(definition.cost);
                if let Some(card) = self.state.card_mut(entity) {
                    if definition.card_type == CardType::Minion && !card.flags.has_charge {
                        card.flags.has_summoning_sickness = true;
                    }
                }
            }
            None => {
                self.state.player_mut(player).spend_mana(definition.cost);
                self.state.move_card(entity, player, Zone::Cemetery, ZonePosition::Top)?;
                self.state.log(LogEntry::Cast { player, card: entity });
                let mut draft = TriggerDraft::new(entity, CAST, player, Zone::Cemetery);
                draft.target = target;
                self.state.storyline.enqueue(draft);
            }
        }
        Ok(())
    }

    fn move_unit(&mut self, player: PlayerId, entity: EntityId, to: Coord, layer: Layer) -> Result<(), IllegalAction> {
        let card = self.own_card(player, entity)?;
        if !card.card_type().is_unit() {
            return Err(IllegalAction::WrongCardType(entity));
        }
        let steps = check_move(card, &self.state.board, to, layer)?;
        tracing::debug!(card = %entity, %to, steps, "move");

        self.state.relocate(entity, Position::Location { at: to, layer })?;
        self.state.set_tapped(entity, true);
        Ok(())
    }

    fn attack(&mut self, player: PlayerId, attacker: EntityId, defender: EntityId) -> Result<(), IllegalAction> {
        let striker = self.own_card(player, attacker)?;
        let target = self.state.require_card(defender)?;
        let kind = check_strike(striker, target, &self.state.board, &self.state)?;

        let life = |card: &CardInstance| match card.card_type() {
            CardType::Avatar => u32::try_from(self.state.player(card.controller).life).unwrap_or(0),
            _ => card.remaining_defence(),
        };
        let result = resolve_strike(
            Combatant::new(striker, life(striker)),
            Combatant::new(target, life(target)),
            kind,
        );

        self.state.set_tapped(attacker, true);
        self.state.apply_damage(defender, result.damage_to_defender);
        self.state.apply_damage(attacker, result.damage_to_attacker);
        self.state.emit(GameEvent::Struck { attacker, defender });
        self.state.log(LogEntry::Struck { attacker, defender, result });
        Ok(())
    }

    fn activate(
        &mut self,
        player: PlayerId,
        entity: EntityId,
        ability: &str,
        target: Option<EntityId>,
    ) -> Result<(), IllegalAction> {
        let card = self.own_card(player, entity)?;
        if !card.is_on_realm() {
            return Err(IllegalAction::NotOnRealm(entity));
        }
        let not_activated = || IllegalAction::NotActivated {
            card: entity,
            ability: ability.to_string(),
        };
        if !card.has_ability(ability) {
            return Err(not_activated());
        }
        let Some(AbilityHandler::Activated { cost, .. }) = self.registry.get(ability) else {
            return Err(not_activated());
        };
        let cost = *cost;

        if card.is_disabled() {
            return Err(IllegalAction::Disabled(entity));
        }
        match cost {
            ActivationCost::Free => {}
            ActivationCost::Tap => {
                if card.flags.is_tapped {
                    return Err(IllegalAction::Tapped(entity));
                }
                if card.flags.has_summoning_sickness {
                    return Err(IllegalAction::SummoningSick(entity));
                }
            }
            ActivationCost::Mana(required) => {
                let available = self.state.player(player).mana;
                if available < required {
                    return Err(IllegalAction::InsufficientMana { required, available });
                }
            }
        }
        self.target_check(target)?;

        match cost {
            ActivationCost::Free => {}
            ActivationCost::Tap => {
                self.state.set_tapped(entity, true);
            }
            ActivationCost::Mana(required) => {
                self.state.player_mut(player).spend_mana(required);
            }
        }
        let mut draft = TriggerDraft::new(entity, ability, player, Zone::Realm);
        draft.target = target;
        self.state.storyline.enqueue(draft);
        Ok(())
    }
}
