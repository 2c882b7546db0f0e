//! Turn controller tests.
//!
//! Full games driven through `progress`/`decide` exactly as a host would:
//! mulligans, site play, casting, rulings, priority passing, drawing and
//! the ways a game can end. Every game runs with invariant checks on.

use realm_engine::abilities::{AbilityHandler, AbilityRegistry, Effect, EffectTarget, Ruling};
use realm_engine::board::{Coord, Layer, Position};
use realm_engine::cards::{can_strike, CardDefinition, CardId, CardRegistry, CardType};
use realm_engine::core::{EngineConfig, EngineError, EntityId, IllegalAction, LogEntry, PlayerAction, PlayerId, PlayerMap};
use realm_engine::triggers::TriggerCondition;
use realm_engine::turn::{Decision, DeckList, GameResult, PendingDecision, Phase, Progress, TurnController, AVATAR_START};
use realm_engine::zones::{Pile, Zone};

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);

fn catalog() -> CardRegistry {
    let mut catalog = CardRegistry::new();
    catalog
        .register(CardDefinition::new(CardId::new(0), "Sorcerer", CardType::Avatar).with_life(20))
        .unwrap();
    catalog
        .register(CardDefinition::new(CardId::new(1), "Valley", CardType::Site))
        .unwrap();
    catalog
        .register(CardDefinition::new(CardId::new(2), "Squire", CardType::Minion).with_stats(1, 1))
        .unwrap();
    catalog
        .register(CardDefinition::new(CardId::new(3), "Fireball", CardType::Magic).with_cost(1))
        .unwrap();
    catalog
}

fn game(deck: DeckList) -> TurnController {
    TurnController::new(
        EngineConfig::new(7).with_debug_mode(),
        AbilityRegistry::with_builtins(),
        &catalog(),
        &PlayerMap::with_value(deck),
    )
    .unwrap()
}

fn squires() -> DeckList {
    DeckList::new(["Sorcerer"]).with("Valley", 6).with("Squire", 8)
}

fn fireballs() -> DeckList {
    DeckList::new(["Sorcerer"]).with("Valley", 6).with("Fireball", 8)
}

/// Keep both opening hands and run to the first main phase.
fn to_main(game: &mut TurnController) {
    game.progress().unwrap();
    game.decide(P0, Decision::Mulligan(false)).unwrap();
    let progress = game.decide(P1, Decision::Mulligan(false)).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::Priority { player: P0, phase: Phase::Main }));
}

fn in_hand(game: &TurnController, player: PlayerId, card_type: CardType) -> EntityId {
    let state = game.state();
    state
        .zones
        .cards(player, Zone::Hand)
        .iter()
        .copied()
        .find(|&e| state.card(e).is_some_and(|c| c.card_type() == card_type))
        .unwrap()
}

fn act(game: &mut TurnController, player: PlayerId, action: PlayerAction) -> Result<Progress, EngineError> {
    game.decide(player, Decision::Action(action))
}

fn play_site(game: &mut TurnController, player: PlayerId, at: Coord) -> Result<Progress, EngineError> {
    let card = in_hand(game, player, CardType::Site);
    act(game, player, PlayerAction::PlaySite { card, at })
}

fn illegal(result: Result<Progress, EngineError>) -> IllegalAction {
    match result {
        Err(EngineError::IllegalAction(err)) => err,
        other => panic!("expected an illegal action, got {other:?}"),
    }
}

fn main_phase(player: PlayerId) -> Progress {
    Progress::Pending(PendingDecision::Priority { player, phase: Phase::Main })
}

/// Both players pass; the next player draws from `pile`.
fn end_turn(game: &mut TurnController, active: PlayerId, pile: Pile) {
    let next = active.opponent();
    act(game, active, PlayerAction::Pass).unwrap();
    let progress = act(game, next, PlayerAction::Pass).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::ChooseDrawPile { player: next }));
    assert_eq!(game.decide(next, Decision::DrawFrom(pile)).unwrap(), main_phase(next));
}

fn skirmish_catalog() -> CardRegistry {
    let mut catalog = catalog();
    catalog
        .register(
            CardDefinition::new(CardId::new(4), "Archer", CardType::Minion)
                .with_stats(3, 3)
                .with_range(4)
                .with_rules_text("Ranged, Charge, Lifelink"),
        )
        .unwrap();
    catalog
        .register(
            CardDefinition::new(CardId::new(5), "Charger", CardType::Minion)
                .with_stats(2, 2)
                .with_rules_text("Charge"),
        )
        .unwrap();
    catalog
        .register(
            CardDefinition::new(CardId::new(6), "Martyr", CardType::Minion)
                .with_stats(1, 1)
                .with_rules_text("Deathrite"),
        )
        .unwrap();
    catalog
        .register(
            CardDefinition::new(CardId::new(7), "Well", CardType::Minion)
                .with_stats(0, 2)
                .with_rules_text("T → Gain 1 life"),
        )
        .unwrap();
    catalog
}

/// Each player brings their own spellbook card. Martyrs gain their
/// controller 2 life when they die.
fn skirmish(ours: &str, theirs: &str) -> TurnController {
    let mut registry = AbilityRegistry::with_builtins();
    registry.register(
        "lifelink",
        AbilityHandler::triggered(TriggerCondition::Strikes)
            .with_effects(vec![Effect::gain_life(EffectTarget::Controller, 1)]),
    );
    let decks = PlayerMap::new(|p| {
        let spell = if p == P0 { ours } else { theirs };
        DeckList::new(["Sorcerer"]).with("Valley", 8).with(spell, 8)
    });
    let mut game = TurnController::new(
        EngineConfig::new(7).with_debug_mode(),
        registry,
        &skirmish_catalog(),
        &decks,
    )
    .unwrap();
    game.record_ruling("Martyr", "deathrite", Ruling::Effects(vec![Effect::gain_life(EffectTarget::Controller, 2)]));
    to_main(&mut game);
    game
}

fn cast_at(game: &mut TurnController, player: PlayerId, at: Coord) -> EntityId {
    let card = in_hand(game, player, CardType::Minion);
    act(game, player, PlayerAction::CastSpell { card, at: Some(at), target: None }).unwrap();
    card
}

fn resolved_abilities(game: &TurnController) -> Vec<&str> {
    game.state()
        .journal()
        .iter()
        .filter_map(|entry| match entry {
            LogEntry::Resolved { ability, .. } => Some(ability.as_str()),
            _ => None,
        })
        .collect()
}

fn fizzled(game: &TurnController) -> bool {
    game.state().journal().iter().any(|e| matches!(e, LogEntry::Fizzled { .. }))
}

/// P1 guards its home site with a martyr; on turn 3 P0 lines up an archer
/// two rows behind its own home, in the same column.
fn archer_duel() -> (TurnController, EntityId, EntityId) {
    let mut game = skirmish("Archer", "Martyr");
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();
    end_turn(&mut game, P0, Pile::Spellbook);

    play_site(&mut game, P1, AVATAR_START[1]).unwrap();
    let martyr = cast_at(&mut game, P1, AVATAR_START[1]);
    end_turn(&mut game, P1, Pile::Atlas);

    let lane = Coord::new(4, 2);
    play_site(&mut game, P0, lane).unwrap();
    let archer = cast_at(&mut game, P0, lane);
    assert!(!game.state().card(archer).unwrap().flags.has_summoning_sickness);
    (game, archer, martyr)
}

// =============================================================================
// Setup
// =============================================================================

/// One mulligan each; the hand and library keep their sizes.
#[test]
fn test_mulligan_flow() {
    let mut game = game(squires());
    assert_eq!(game.progress().unwrap(), Progress::Pending(PendingDecision::Mulligan { player: P0 }));

    // Out of turn answers are rejected and change nothing.
    assert_eq!(illegal(game.decide(P1, Decision::Mulligan(true))), IllegalAction::UnexpectedDecision);
    assert_eq!(game.pending(), Some(&PendingDecision::Mulligan { player: P0 }));

    let library = game.state().zones.library_size(P0);
    let progress = game.decide(P0, Decision::Mulligan(true)).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::Mulligan { player: P1 }));
    assert_eq!(game.state().zones.size(P0, Zone::Hand), 7);
    assert_eq!(game.state().zones.library_size(P0), library);
    assert_eq!(game.state().player(P0).mulligans, 1);

    let progress = game.decide(P1, Decision::Mulligan(false)).unwrap();
    assert_eq!(progress.pending().and_then(PendingDecision::player), Some(P0));
    assert!(game
        .state()
        .journal()
        .iter()
        .any(|e| matches!(e, LogEntry::Mulligan { player } if *player == P0)));
}

/// The first player skips their first draw.
#[test]
fn test_first_turn_has_no_draw() {
    let mut game = game(squires());
    to_main(&mut game);

    let state = game.state();
    assert_eq!(state.turn, 1);
    assert_eq!(state.phase, Phase::Main);
    assert_eq!(state.active_player, P0);
    assert_eq!(state.zones.size(P0, Zone::Hand), 7);
    assert!(!state.journal().iter().any(|e| matches!(e, LogEntry::Drew { .. })));

    for player in [P0, P1] {
        let avatar = state.avatar(player).unwrap();
        assert_eq!(
            avatar.position,
            Some(Position::Location { at: AVATAR_START[player.index()], layer: Layer::Surface })
        );
    }
}

// =============================================================================
// Main phase actions
// =============================================================================

/// Sites start beneath the avatar, tap it and add mana.
#[test]
fn test_play_site() {
    let mut game = game(squires());
    to_main(&mut game);

    let before = game.public_state();
    assert_eq!(
        illegal(play_site(&mut game, P0, Coord::new(0, 0))),
        IllegalAction::SiteNotConnected(Coord::new(0, 0))
    );
    assert_eq!(game.public_state(), before);
    assert_eq!(game.pending(), Some(&PendingDecision::Priority { player: P0, phase: Phase::Main }));

    let home = AVATAR_START[0];
    play_site(&mut game, P0, home).unwrap();
    let state = game.state();
    assert_eq!(state.sites_of(P0), vec![home]);
    assert_eq!(state.player(P0).mana, 1);
    assert!(state.avatar(P0).unwrap().flags.is_tapped);
    assert_eq!(state.zones.size(P0, Zone::Hand), 6);

    // The avatar is already tapped.
    assert!(matches!(
        illegal(play_site(&mut game, P0, Coord::new(3, 1))),
        IllegalAction::Tapped(_)
    ));
}

/// Only the priority holder may act, and only the active player may cast.
#[test]
fn test_priority_is_enforced() {
    let mut game = game(squires());
    to_main(&mut game);

    assert_eq!(illegal(act(&mut game, P1, PlayerAction::Pass)), IllegalAction::NotYourPriority(P1));
    assert_eq!(illegal(game.decide(P0, Decision::DrawFrom(Pile::Atlas))), IllegalAction::UnexpectedDecision);
    assert_eq!(game.pending(), Some(&PendingDecision::Priority { player: P0, phase: Phase::Main }));
}

/// A minion is cast onto its controller's site and arrives summoning sick.
#[test]
fn test_cast_minion() {
    let mut game = game(squires());
    to_main(&mut game);
    let home = AVATAR_START[0];

    let squire = in_hand(&game, P0, CardType::Minion);
    let cast = PlayerAction::CastSpell { card: squire, at: Some(home), target: None };
    assert_eq!(illegal(act(&mut game, P0, cast.clone())), IllegalAction::NoSite(home));

    play_site(&mut game, P0, home).unwrap();
    act(&mut game, P0, cast).unwrap();

    let card = game.state().card(squire).unwrap();
    assert_eq!(card.zone, Zone::Realm);
    assert_eq!(card.position, Some(Position::Location { at: home, layer: Layer::Surface }));
    assert!(card.flags.has_summoning_sickness);

    let step = PlayerAction::Move { card: squire, to: Coord::new(3, 1), layer: Layer::Surface };
    assert_eq!(illegal(act(&mut game, P0, step)), IllegalAction::SummoningSick(squire));
    assert_eq!(game.state().history().len(), 2);
}

// =============================================================================
// Rulings
// =============================================================================

/// A sorcery pauses for a ruling, which anyone may give, then resolves.
#[test]
fn test_magic_needs_ruling() {
    let mut game = game(fireballs());
    to_main(&mut game);
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();

    let fireball = in_hand(&game, P0, CardType::Magic);
    let progress = act(&mut game, P0, PlayerAction::CastSpell { card: fireball, at: None, target: None }).unwrap();
    let Progress::Pending(PendingDecision::Ruling(required)) = progress else {
        panic!("expected a ruling request, got {progress:?}");
    };
    assert_eq!(required.source_name, "Fireball");
    assert_eq!(required.ability, "cast");
    assert_eq!(game.state().card(fireball).unwrap().zone, Zone::Cemetery);
    assert_eq!(game.state().storyline.len(), 1);

    assert_eq!(illegal(act(&mut game, P0, PlayerAction::Pass)), IllegalAction::UnexpectedDecision);

    let ruling = Ruling::Effects(vec![Effect::damage(EffectTarget::Opponent, 3)]);
    let progress = game.decide(P1, Decision::Ruling(ruling)).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::Priority { player: P0, phase: Phase::Main }));
    assert_eq!(game.state().player(P1).life, 17);
    assert!(game.state().storyline.is_empty());

    // Mana is spent.
    let second = in_hand(&game, P0, CardType::Magic);
    assert_eq!(
        illegal(act(&mut game, P0, PlayerAction::CastSpell { card: second, at: None, target: None })),
        IllegalAction::InsufficientMana { required: 1, available: 0 }
    );
}

/// A ruling recorded in advance resolves without asking.
#[test]
fn test_recorded_ruling_skips_request() {
    let mut game = game(fireballs());
    game.record_ruling("Fireball", "cast", Ruling::Effects(vec![Effect::damage(EffectTarget::Opponent, 2)]));
    to_main(&mut game);
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();

    let fireball = in_hand(&game, P0, CardType::Magic);
    let progress = act(&mut game, P0, PlayerAction::CastSpell { card: fireball, at: None, target: None }).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::Priority { player: P0, phase: Phase::Main }));
    assert_eq!(game.state().player(P1).life, 18);
}

// =============================================================================
// Turn flow
// =============================================================================

/// Two passes end the turn; the next player untaps and chooses a pile.
#[test]
fn test_turn_passes() {
    let mut game = game(squires());
    to_main(&mut game);
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();

    assert_eq!(
        act(&mut game, P0, PlayerAction::Pass).unwrap(),
        Progress::Pending(PendingDecision::Priority { player: P1, phase: Phase::Main })
    );
    let progress = act(&mut game, P1, PlayerAction::Pass).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::ChooseDrawPile { player: P1 }));

    let state = game.state();
    assert_eq!(state.turn, 2);
    assert_eq!(state.active_player, P1);
    assert_eq!(state.phase, Phase::Start);
    // Only the active player's cards untap.
    assert!(state.avatar(P0).unwrap().flags.is_tapped);

    let progress = game.decide(P1, Decision::DrawFrom(Pile::Spellbook)).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::Priority { player: P1, phase: Phase::Main }));
    assert_eq!(game.state().zones.size(P1, Zone::Hand), 8);
}

/// Units lose summoning sickness on their controller's next turn.
#[test]
fn test_minion_moves_next_turn() {
    let mut game = game(squires());
    to_main(&mut game);
    let home = AVATAR_START[0];
    play_site(&mut game, P0, home).unwrap();
    let squire = in_hand(&game, P0, CardType::Minion);
    act(&mut game, P0, PlayerAction::CastSpell { card: squire, at: Some(home), target: None }).unwrap();

    act(&mut game, P0, PlayerAction::Pass).unwrap();
    act(&mut game, P1, PlayerAction::Pass).unwrap();
    game.decide(P1, Decision::DrawFrom(Pile::Atlas)).unwrap();
    act(&mut game, P1, PlayerAction::Pass).unwrap();
    let progress = act(&mut game, P0, PlayerAction::Pass).unwrap();
    assert_eq!(progress, Progress::Pending(PendingDecision::ChooseDrawPile { player: P0 }));
    game.decide(P0, Decision::DrawFrom(Pile::Spellbook)).unwrap();

    assert_eq!(game.state().turn, 3);
    assert!(!game.state().avatar(P0).unwrap().flags.is_tapped);

    // The next cell is void until a site is played there.
    let next = Coord::new(3, 1);
    let step = PlayerAction::Move { card: squire, to: next, layer: Layer::Surface };
    assert!(matches!(illegal(act(&mut game, P0, step.clone())), IllegalAction::ForbiddenRegion { .. }));

    play_site(&mut game, P0, next).unwrap();
    act(&mut game, P0, step.clone()).unwrap();
    let card = game.state().card(squire).unwrap();
    assert_eq!(card.position, Some(Position::Location { at: next, layer: Layer::Surface }));
    assert!(card.flags.is_tapped);
    assert_eq!(illegal(act(&mut game, P0, step)), IllegalAction::Tapped(squire));
}

// =============================================================================
// Strikes
// =============================================================================

/// A killing ranged strike: the striker's trigger and the victim's
/// Deathrite both resolve, the victim's first.
#[test]
fn test_lethal_strike_resolves_both_triggers() {
    let (mut game, archer, martyr) = archer_duel();

    let progress = act(&mut game, P0, PlayerAction::Attack { attacker: archer, defender: martyr }).unwrap();
    assert_eq!(progress, main_phase(P0));

    let state = game.state();
    let striker = state.card(archer).unwrap();
    assert!(striker.flags.is_tapped);
    // Martyrs cannot shoot back.
    assert_eq!(striker.damage, 0);
    assert_eq!(state.card(martyr).unwrap().zone, Zone::Cemetery);
    assert_eq!(state.player(P0).life, 21);
    assert_eq!(state.player(P1).life, 22);
    assert_eq!(resolved_abilities(&game), vec!["deathrite", "lifelink"]);
    assert!(!fizzled(&game));
    assert!(game.state().storyline.is_empty());

    let avatar = game.state().avatar(P1).unwrap().entity;
    assert_eq!(
        illegal(act(&mut game, P0, PlayerAction::Attack { attacker: archer, defender: avatar })),
        IllegalAction::Tapped(archer)
    );
}

/// Damage to an avatar comes off its player's life.
#[test]
fn test_strike_on_avatar_costs_life() {
    let (mut game, archer, _) = archer_duel();
    let avatar = game.state().avatar(P1).unwrap().entity;

    act(&mut game, P0, PlayerAction::Attack { attacker: archer, defender: avatar }).unwrap();

    let state = game.state();
    assert_eq!(state.player(P1).life, 17);
    assert_eq!(state.player(P0).life, 21);
    assert_eq!(state.avatar(P1).unwrap().zone, Zone::Realm);
    assert!(state
        .journal()
        .iter()
        .any(|e| matches!(e, LogEntry::LifeChanged { player, life: 17 } if *player == P1)));
}

/// Neighbouring units trade blows; the defender dies and its Deathrite
/// resolves from the cemetery.
#[test]
fn test_adjacent_strike_kills_defender() {
    let mut game = skirmish("Charger", "Martyr");
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();
    end_turn(&mut game, P0, Pile::Spellbook);
    play_site(&mut game, P1, AVATAR_START[1]).unwrap();
    end_turn(&mut game, P1, Pile::Atlas);
    play_site(&mut game, P0, Coord::new(4, 2)).unwrap();
    end_turn(&mut game, P0, Pile::Spellbook);

    let outpost = Coord::new(1, 2);
    play_site(&mut game, P1, outpost).unwrap();
    let martyr = cast_at(&mut game, P1, outpost);
    end_turn(&mut game, P1, Pile::Atlas);
    play_site(&mut game, P0, Coord::new(3, 2)).unwrap();
    end_turn(&mut game, P0, Pile::Spellbook);
    end_turn(&mut game, P1, Pile::Atlas);

    let front = Coord::new(2, 2);
    play_site(&mut game, P0, front).unwrap();
    let charger = cast_at(&mut game, P0, front);
    let state = game.state();
    assert_eq!(state.turn, 7);
    assert!(can_strike(
        state.card(charger).unwrap(),
        state.card(martyr).unwrap(),
        &state.board,
        state
    ));

    let progress = act(&mut game, P0, PlayerAction::Attack { attacker: charger, defender: martyr }).unwrap();
    assert_eq!(progress, main_phase(P0));

    let state = game.state();
    assert_eq!(state.card(martyr).unwrap().zone, Zone::Cemetery);
    let striker = state.card(charger).unwrap();
    assert_eq!(striker.zone, Zone::Realm);
    assert_eq!(striker.damage, 1);
    assert!(striker.flags.is_tapped);
    assert!(state.journal().iter().any(|e| matches!(
        e,
        LogEntry::Struck { result, .. } if result.retaliated && result.damage_to_defender == 2
    )));
    assert_eq!(state.player(P1).life, 22);
    assert_eq!(resolved_abilities(&game), vec!["deathrite"]);
    assert!(!fizzled(&game));
}

// =============================================================================
// Activated abilities
// =============================================================================

/// Tap abilities wait out summoning sickness, tap their card, and go
/// through the storyline like any other ability.
#[test]
fn test_activate_tap_ability() {
    let mut game = skirmish("Well", "Well");
    end_turn(&mut game, P0, Pile::Spellbook);

    play_site(&mut game, P1, AVATAR_START[1]).unwrap();
    let well = cast_at(&mut game, P1, AVATAR_START[1]);
    let tap = PlayerAction::Activate { card: well, ability: "tap".into(), target: None };
    assert_eq!(illegal(act(&mut game, P1, tap.clone())), IllegalAction::SummoningSick(well));
    let unknown = PlayerAction::Activate { card: well, ability: "deathrite".into(), target: None };
    assert!(matches!(
        illegal(act(&mut game, P1, unknown)),
        IllegalAction::NotActivated { card, .. } if card == well
    ));
    end_turn(&mut game, P1, Pile::Spellbook);

    // Still sick during the opponent's turn.
    assert_eq!(act(&mut game, P0, PlayerAction::Pass).unwrap(), main_phase(P1));
    assert_eq!(illegal(act(&mut game, P1, tap.clone())), IllegalAction::SummoningSick(well));
    act(&mut game, P1, PlayerAction::Pass).unwrap();
    game.decide(P1, Decision::DrawFrom(Pile::Spellbook)).unwrap();
    end_turn(&mut game, P1, Pile::Spellbook);

    // Turn 5: P0 passes and P1 answers with the well.
    assert_eq!(game.state().active_player, P0);
    assert_eq!(act(&mut game, P0, PlayerAction::Pass).unwrap(), main_phase(P1));
    let progress = act(&mut game, P1, tap.clone()).unwrap();
    let Progress::Pending(PendingDecision::Ruling(required)) = progress else {
        panic!("expected a ruling request, got {progress:?}");
    };
    assert_eq!(required.source_name, "Well");
    assert_eq!(required.ability, "tap");
    assert!(game.state().card(well).unwrap().flags.is_tapped);
    assert_eq!(game.state().storyline.len(), 1);

    let ruling = Ruling::Effects(vec![Effect::gain_life(EffectTarget::Controller, 1)]);
    let progress = game.decide(P1, Decision::Ruling(ruling)).unwrap();
    assert_eq!(progress, main_phase(P0));
    assert_eq!(game.state().player(P1).life, 21);
    assert!(game.state().storyline.is_empty());

    act(&mut game, P0, PlayerAction::Pass).unwrap();
    assert_eq!(illegal(act(&mut game, P1, tap)), IllegalAction::Tapped(well));
}

// =============================================================================
// Game end
// =============================================================================

#[test]
fn test_concede() {
    let mut game = game(squires());
    to_main(&mut game);

    let progress = act(&mut game, P1, PlayerAction::Concede).unwrap();
    assert_eq!(progress, Progress::Finished(GameResult::Winner(P0)));
    assert_eq!(game.result(), Some(GameResult::Winner(P0)));
    assert_eq!(illegal(act(&mut game, P0, PlayerAction::Pass)), IllegalAction::GameOver);
}

/// A player who must draw from an empty library loses.
#[test]
fn test_empty_library_loses() {
    let deck = DeckList::new(["Sorcerer"]).with("Valley", 3).with("Squire", 4);
    let mut game = game(deck);
    to_main(&mut game);
    assert_eq!(game.state().zones.library_size(P1), 0);

    act(&mut game, P0, PlayerAction::Pass).unwrap();
    let progress = act(&mut game, P1, PlayerAction::Pass).unwrap();
    assert_eq!(progress, Progress::Finished(GameResult::Winner(P0)));
}

#[test]
fn test_abort_clears_storyline() {
    let mut game = game(fireballs());
    to_main(&mut game);
    play_site(&mut game, P0, AVATAR_START[0]).unwrap();
    let fireball = in_hand(&game, P0, CardType::Magic);
    act(&mut game, P0, PlayerAction::CastSpell { card: fireball, at: None, target: None }).unwrap();
    assert!(!game.state().storyline.is_empty());

    game.abort();
    assert!(game.state().storyline.is_empty());
    assert_eq!(game.pending(), None);
    assert_eq!(game.progress().unwrap(), Progress::Finished(GameResult::Aborted));
}

#[test]
fn test_deck_needs_one_avatar() {
    let deck = DeckList::new(["Valley"]).with("Squire", 4);
    let result = TurnController::new(
        EngineConfig::new(1),
        AbilityRegistry::with_builtins(),
        &catalog(),
        &PlayerMap::with_value(deck),
    );
    assert!(result.is_err());
}
