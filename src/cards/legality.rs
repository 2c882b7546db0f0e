//! Movement and strike legality.
//!
//! Every check reads explicit flags on `CardInstance`; nothing dispatches on
//! a card's name. Checks are pure: they never mutate the card or the board.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::MovementKind;
use super::flags::CardFlags;
use super::instance::CardInstance;
use crate::board::{Board, Coord, Layer, Position, Region};
use crate::core::{EntityId, IllegalAction};

/// Read access to card instances by entity.
pub trait CardLookup {
    fn card(&self, entity: EntityId) -> Option<&CardInstance>;
}

impl CardLookup for FxHashMap<EntityId, CardInstance> {
    fn card(&self, entity: EntityId) -> Option<&CardInstance> {
        self.get(&entity)
    }
}

/// How a legal strike reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeKind {
    /// Same or orthogonally adjacent location.
    Melee,
    /// Along a projectile ray, within range.
    Ranged,
}

/// Damage both sides deal in one strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeResult {
    pub damage_to_defender: u32,
    pub damage_to_attacker: u32,
    /// Whether the defender struck back.
    pub retaliated: bool,
}

/// A card in a strike with the life it has left.
///
/// For minions `life` is remaining defence; for avatars it is the
/// controlling player's life total.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub card: &'a CardInstance,
    pub life: u32,
}

impl<'a> Combatant<'a> {
    #[must_use]
    pub fn new(card: &'a CardInstance, life: u32) -> Self {
        Self { card, life }
    }

    fn damage_against(&self, other: &Combatant<'_>) -> u32 {
        if self.card.flags.is_lethal {
            other.life
        } else {
            self.card.attack()
        }
    }
}

/// Whether terrain flags let a card stand in a region.
#[must_use]
pub fn region_allows(flags: &CardFlags, region: Region) -> bool {
    match region {
        Region::Void => flags.is_voidwalker,
        Region::Underwater => !flags.is_landbound,
        Region::Surface | Region::Underground => !flags.is_waterbound || flags.is_voidwalker,
    }
}

fn ready_check(card: &CardInstance) -> Result<(), IllegalAction> {
    if card.is_disabled() {
        return Err(IllegalAction::Disabled(card.entity));
    }
    if card.flags.is_tapped {
        return Err(IllegalAction::Tapped(card.entity));
    }
    if card.flags.has_summoning_sickness {
        return Err(IllegalAction::SummoningSick(card.entity));
    }
    Ok(())
}

fn realm_position(card: &CardInstance) -> Result<Position, IllegalAction> {
    card.position
        .filter(|_| card.is_on_realm())
        .ok_or(IllegalAction::NotOnRealm(card.entity))
}

/// Validate a move to `to`, entering the given layer there.
///
/// Returns the number of steps taken. Paths are searched breadth-first
/// over adjacent (or, for airborne and nearby movers, nearby) locations,
/// and every cell on the path must be enterable.
pub fn check_move(card: &CardInstance, board: &Board, to: Coord, layer: Layer) -> Result<u32, IllegalAction> {
    let from = realm_position(card)?;

    if card.flags.is_immobile {
        return Err(IllegalAction::Immobile(card.entity));
    }
    ready_check(card)?;

    let destination = board.location(to).ok_or(IllegalAction::OffBoard(to))?;
    if !region_allows(&card.flags, destination.region) {
        return Err(IllegalAction::ForbiddenRegion {
            card: card.entity,
            region: destination.region,
            at: to,
        });
    }

    if layer == Layer::Subsurface {
        let allowed = match destination.region {
            Region::Underwater => card.flags.is_submergeable,
            Region::Surface | Region::Underground => card.flags.is_burrowable,
            Region::Void => false,
        };
        if !allowed {
            return Err(IllegalAction::NoSubsurfaceAccess { card: card.entity, at: to });
        }
    }

    let start = from.coord();
    if start == to && from == (Position::Location { at: to, layer }) {
        return Err(IllegalAction::AlreadyThere(to));
    }

    let nearby = card.flags.is_airborne || card.definition.movement_kind == MovementKind::Nearby;
    let steps = path_length(board, &card.flags, start, to, nearby, card.definition.movement);

    steps.ok_or(IllegalAction::OutOfRange {
        at: to,
        distance: if nearby { start.chebyshev(to) } else { start.manhattan(to) },
        movement: card.definition.movement,
    })
}

/// Whether a surface move to `to` is legal.
#[must_use]
pub fn can_move(card: &CardInstance, board: &Board, to: Coord) -> bool {
    check_move(card, board, to, Layer::Surface).is_ok()
}

fn path_length(board: &Board, flags: &CardFlags, from: Coord, to: Coord, nearby: bool, limit: u32) -> Option<u32> {
    let mut frontier: SmallVec<[Coord; 8]> = SmallVec::new();
    frontier.push(from);
    let mut seen = FxHashSet::default();
    seen.insert(from);

    for step in 0..=limit {
        if frontier.contains(&to) {
            return Some(step);
        }
        let mut next: SmallVec<[Coord; 8]> = SmallVec::new();
        for at in &frontier {
            let neighbours: SmallVec<[(Coord, Region); 8]> = if nearby {
                board
                    .get_nearby_locations(at.row, at.col)
                    .into_iter()
                    .map(|(c, l)| (c, l.region))
                    .collect()
            } else {
                board
                    .get_adjacent_locations(at.row, at.col)
                    .into_iter()
                    .map(|(c, l)| (c, l.region))
                    .collect()
            };
            for (coord, region) in neighbours {
                if region_allows(flags, region) && seen.insert(coord) {
                    next.push(coord);
                }
            }
        }
        frontier = next;
    }
    None
}

/// Validate a strike and determine how it reaches.
pub fn check_strike<L: CardLookup>(
    attacker: &CardInstance,
    defender: &CardInstance,
    board: &Board,
    cards: &L,
) -> Result<StrikeKind, IllegalAction> {
    if attacker.entity == defender.entity {
        return Err(IllegalAction::SelfStrike);
    }
    if !attacker.card_type().is_unit() {
        return Err(IllegalAction::WrongCardType(attacker.entity));
    }
    if !defender.card_type().is_unit() {
        return Err(IllegalAction::WrongCardType(defender.entity));
    }

    let from = realm_position(attacker)?;
    ready_check(attacker)?;
    let target = realm_position(defender)?;

    // Subsurface cards only meet cards in the same layer of the same cell.
    let attacker_under = matches!(from, Position::Location { layer: Layer::Subsurface, .. });
    let defender_under = matches!(target, Position::Location { layer: Layer::Subsurface, .. });
    if attacker_under || defender_under {
        return if from == target {
            Ok(StrikeKind::Melee)
        } else {
            Err(IllegalAction::NotInStrikeRange(defender.entity))
        };
    }

    let (origin, goal) = (from.coord(), target.coord());
    if origin == goal || Board::are_adjacent(origin, goal) {
        return Ok(StrikeKind::Melee);
    }

    if !attacker.flags.is_ranged || defender.flags.is_stealthy {
        return Err(IllegalAction::NotInStrikeRange(defender.entity));
    }

    let range = usize::try_from(attacker.definition.range).unwrap_or(usize::MAX);
    for ray in board.get_projectile_locations(origin.row, origin.col) {
        let mut blocker = None;
        for (at, location) in ray.take(range) {
            if at == goal {
                return match blocker {
                    Some(blocker) => Err(IllegalAction::NoLineOfFire {
                        target: defender.entity,
                        blocker,
                    }),
                    None => Ok(StrikeKind::Ranged),
                };
            }
            if blocker.is_none() {
                blocker = location
                    .surface
                    .iter()
                    .filter_map(|&e| cards.card(e))
                    .find(|c| blocks(attacker, c))
                    .map(|c| c.entity);
            }
        }
    }
    Err(IllegalAction::NotInStrikeRange(defender.entity))
}

/// An intervening unit blocks unless either side is airborne.
fn blocks(attacker: &CardInstance, candidate: &CardInstance) -> bool {
    candidate.card_type().is_unit() && !candidate.flags.is_airborne && !attacker.flags.is_airborne
}

/// Whether `attacker` may strike `defender` right now.
#[must_use]
pub fn can_strike<L: CardLookup>(attacker: &CardInstance, defender: &CardInstance, board: &Board, cards: &L) -> bool {
    check_strike(attacker, defender, board, cards).is_ok()
}

/// Compute damage for a strike. Both sides strike simultaneously unless
/// the defender cannot retaliate.
///
/// A lethal striker deals exactly the other side's remaining life.
/// The defender retaliates when it is not disabled, does not carry the
/// no-retaliation policy, and can reach back: always in melee, and against
/// a ranged strike only if it is ranged itself.
#[must_use]
pub fn resolve_strike(attacker: Combatant<'_>, defender: Combatant<'_>, kind: StrikeKind) -> StrikeResult {
    let damage_to_defender = attacker.damage_against(&defender);

    let retaliated = !defender.card.flags.no_retaliation
        && !defender.card.is_disabled()
        && (kind == StrikeKind::Melee || defender.card.flags.is_ranged);

    let damage_to_attacker = if retaliated { defender.damage_against(&attacker) } else { 0 };

    StrikeResult {
        damage_to_defender,
        damage_to_attacker,
        retaliated,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType, Capability};
    use crate::core::PlayerId;
    use crate::zones::Zone;

    fn unit(entity: u32, caps: &[Capability]) -> CardInstance {
        let def = CardDefinition::new(CardId::new(entity), format!("Unit {entity}"), CardType::Minion)
            .with_stats(2, 3);
        let flags = CardFlags::from_capabilities(caps.iter().copied());
        CardInstance::new(EntityId(entity), Arc::new(def), PlayerId::new(0), Zone::Realm)
            .with_abilities(Vec::new(), String::new(), flags)
    }

    fn place(card: &mut CardInstance, board: &mut Board, at: Coord) {
        let position = Position::Location { at, layer: Layer::Surface };
        board.place(card.entity, position).unwrap();
        card.position = Some(position);
    }

    fn land_board() -> Board {
        let mut board = Board::new();
        for (i, at) in Board::coords().enumerate() {
            board.place_site(at, EntityId(100 + i as u32), Region::Surface).unwrap();
        }
        board
    }

    #[test]
    fn test_move_one_step() {
        let mut board = land_board();
        let mut card = unit(2, &[]);
        place(&mut card, &mut board, Coord::new(2, 2));

        assert!(can_move(&card, &board, Coord::new(2, 1)));
        assert!(!can_move(&card, &board, Coord::new(3, 3)));
        assert_eq!(
            check_move(&card, &board, Coord::new(0, 2), Layer::Surface),
            Err(IllegalAction::OutOfRange { at: Coord::new(0, 2), distance: 2, movement: 1 })
        );
    }

    #[test]
    fn test_airborne_moves_diagonally() {
        let mut board = land_board();
        let mut card = unit(2, &[Capability::Airborne]);
        place(&mut card, &mut board, Coord::new(2, 2));
        assert!(can_move(&card, &board, Coord::new(3, 3)));
    }

    #[test]
    fn test_ready_checks() {
        let mut board = land_board();
        let mut card = unit(2, &[]);
        place(&mut card, &mut board, Coord::new(2, 2));
        let to = Coord::new(2, 3);

        card.flags.is_tapped = true;
        assert_eq!(check_move(&card, &board, to, Layer::Surface), Err(IllegalAction::Tapped(card.entity)));

        card.flags.is_tapped = false;
        card.modifiers.disabled = true;
        assert_eq!(check_move(&card, &board, to, Layer::Surface), Err(IllegalAction::Disabled(card.entity)));

        card.modifiers.disabled = false;
        card.flags.is_immobile = true;
        assert_eq!(check_move(&card, &board, to, Layer::Surface), Err(IllegalAction::Immobile(card.entity)));
    }

    #[test]
    fn test_void_requires_voidwalk() {
        let mut board = Board::new();
        board.place_site(Coord::new(2, 2), EntityId(100), Region::Surface).unwrap();
        let mut card = unit(2, &[]);
        place(&mut card, &mut board, Coord::new(2, 2));
        assert!(!can_move(&card, &board, Coord::new(2, 3)));

        card.flags.is_voidwalker = true;
        assert!(can_move(&card, &board, Coord::new(2, 3)));
    }

    #[test]
    fn test_burrow_and_submerge() {
        let mut board = land_board();
        let mut mole = unit(2, &[Capability::Burrowing]);
        place(&mut mole, &mut board, Coord::new(1, 1));
        assert_eq!(check_move(&mole, &board, Coord::new(1, 1), Layer::Subsurface), Ok(0));

        let fish = {
            let mut c = unit(3, &[]);
            place(&mut c, &mut board, Coord::new(3, 1));
            c
        };
        assert_eq!(
            check_move(&fish, &board, Coord::new(3, 1), Layer::Subsurface),
            Err(IllegalAction::NoSubsurfaceAccess { card: fish.entity, at: Coord::new(3, 1) })
        );
        assert_eq!(
            check_move(&fish, &board, Coord::new(3, 1), Layer::Surface),
            Err(IllegalAction::AlreadyThere(Coord::new(3, 1)))
        );
    }

    #[test]
    fn test_ranged_line_of_fire() {
        let mut board = land_board();
        let mut cards = FxHashMap::default();

        let mut archer = unit(2, &[Capability::Ranged]);
        Arc::make_mut(&mut archer.definition).range = 3;
        let mut wall = unit(3, &[]);
        let mut target = unit(4, &[]);
        place(&mut archer, &mut board, Coord::new(4, 0));
        place(&mut wall, &mut board, Coord::new(3, 0));
        place(&mut target, &mut board, Coord::new(1, 0));

        cards.insert(wall.entity, wall.clone());
        assert_eq!(
            check_strike(&archer, &target, &board, &cards),
            Err(IllegalAction::NoLineOfFire { target: target.entity, blocker: wall.entity })
        );

        // An airborne blocker is ignored.
        wall.flags.is_airborne = true;
        cards.insert(wall.entity, wall.clone());
        assert_eq!(check_strike(&archer, &target, &board, &cards), Ok(StrikeKind::Ranged));

        // Out of range.
        Arc::make_mut(&mut archer.definition).range = 2;
        assert_eq!(
            check_strike(&archer, &target, &board, &cards),
            Err(IllegalAction::NotInStrikeRange(target.entity))
        );
    }

    #[test]
    fn test_unbounded_range_reaches_board_edge() {
        let mut board = land_board();
        let cards = FxHashMap::default();

        let mut archer = unit(2, &[Capability::Ranged]);
        Arc::make_mut(&mut archer.definition).range = u32::MAX;
        let mut target = unit(3, &[]);
        place(&mut archer, &mut board, Coord::new(4, 3));
        place(&mut target, &mut board, Coord::new(0, 3));

        assert_eq!(check_strike(&archer, &target, &board, &cards), Ok(StrikeKind::Ranged));
    }

    #[test]
    fn test_airborne_archer_fires_over_blockers() {
        let mut board = land_board();
        let mut cards = FxHashMap::default();

        let mut archer = unit(2, &[Capability::Ranged, Capability::Airborne]);
        Arc::make_mut(&mut archer.definition).range = 3;
        let mut wall = unit(3, &[]);
        let mut target = unit(4, &[]);
        place(&mut archer, &mut board, Coord::new(0, 0));
        place(&mut wall, &mut board, Coord::new(0, 1));
        place(&mut target, &mut board, Coord::new(0, 3));
        cards.insert(wall.entity, wall);

        assert_eq!(check_strike(&archer, &target, &board, &cards), Ok(StrikeKind::Ranged));
    }

    #[test]
    fn test_retaliation_policy() {
        let attacker = unit(2, &[Capability::Ranged]);
        let defender = unit(3, &[]);

        let melee = resolve_strike(Combatant::new(&attacker, 3), Combatant::new(&defender, 3), StrikeKind::Melee);
        assert_eq!(melee.damage_to_defender, 2);
        assert_eq!(melee.damage_to_attacker, 2);
        assert!(melee.retaliated);

        let ranged = resolve_strike(Combatant::new(&attacker, 3), Combatant::new(&defender, 3), StrikeKind::Ranged);
        assert_eq!(ranged.damage_to_attacker, 0);
        assert!(!ranged.retaliated);

        let passive = unit(4, &[Capability::NoRetaliation]);
        let result = resolve_strike(Combatant::new(&attacker, 3), Combatant::new(&passive, 3), StrikeKind::Melee);
        assert!(!result.retaliated);
    }

    #[test]
    fn test_lethal_takes_all_remaining_life() {
        let mut attacker = unit(2, &[Capability::Lethal]);
        attacker.modifiers.attack = -2;
        let defender = unit(3, &[]);

        let result = resolve_strike(Combatant::new(&attacker, 3), Combatant::new(&defender, 17), StrikeKind::Melee);
        assert_eq!(result.damage_to_defender, 17);
    }
}
