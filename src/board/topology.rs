//! The realm grid and its spatial queries.
//!
//! The board is a fixed 5×4 (rows×cols) matrix of locations plus the
//! derived matrix of intersections. It knows geometry and occupancy only;
//! every rule about who may go where lives in `cards::legality`.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::coord::{Coord, Layer, Position};
use super::location::{Intersection, Location, Region};
use super::ray::{Direction, ProjectileRay};
use crate::core::{EntityId, IllegalAction, InvariantViolation};

/// Orthogonal neighbour offsets: up, down, left, right.
const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Orthogonal and diagonal neighbour offsets, row by row.
const SURROUNDING: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// The realm grid.
///
/// ```
/// use realm_engine::board::Board;
///
/// let board = Board::new();
/// assert_eq!(board.get_location(0, 0).map(|l| l.index), Some(1));
/// assert_eq!(board.get_location(4, 3).map(|l| l.index), Some(20));
/// assert!(board.get_location(5, 0).is_none());
/// assert_eq!(board.get_adjacent_locations(0, 0).len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Row-major cells.
    locations: Vec<Location>,

    /// Row-major intersections, one per cell.
    intersections: Vec<Intersection>,
}

impl Board {
    pub const ROWS: i32 = 5;
    pub const COLS: i32 = 4;

    /// Build an empty board with indices and intersections assigned.
    #[must_use]
    pub fn new() -> Self {
        let locations = (0..Self::ROWS * Self::COLS)
            .map(|i| Location::new(i as u32 + 1))
            .collect();

        let mut board = Self {
            locations,
            intersections: Vec::new(),
        };
        board.intersections = Self::coords().map(Self::intersection_cells).map(Intersection::new).collect();
        board
    }

    /// Cells bordering the intersection based at `at`.
    ///
    /// Interior cells cover the 2×2 block to their south-east. On the last
    /// row or column only the existing south/east neighbours are covered,
    /// and the base cell is always included.
    fn intersection_cells(at: Coord) -> SmallVec<[Coord; 4]> {
        let has_south = at.row < Self::ROWS - 1;
        let has_east = at.col < Self::COLS - 1;

        if has_south && has_east {
            return smallvec![at, at.offset(0, 1), at.offset(1, 0), at.offset(1, 1)];
        }

        let mut cells = SmallVec::new();
        if has_south {
            cells.push(at.offset(1, 0));
        }
        if has_east {
            cells.push(at.offset(0, 1));
        }
        cells.push(at);
        cells
    }

    /// Every coordinate in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..Self::ROWS).flat_map(|row| (0..Self::COLS).map(move |col| Coord::new(row, col)))
    }

    /// Whether a coordinate is on the board.
    #[must_use]
    pub fn contains(coord: Coord) -> bool {
        (0..Self::ROWS).contains(&coord.row) && (0..Self::COLS).contains(&coord.col)
    }

    fn offset_of(coord: Coord) -> Option<usize> {
        Self::contains(coord).then(|| (coord.row * Self::COLS + coord.col) as usize)
    }

    // === Lookup ===

    /// Bounds-checked location lookup.
    #[must_use]
    pub fn get_location(&self, row: i32, col: i32) -> Option<&Location> {
        self.location(Coord::new(row, col))
    }

    /// Bounds-checked intersection lookup.
    #[must_use]
    pub fn get_intersection(&self, row: i32, col: i32) -> Option<&Intersection> {
        self.intersection(Coord::new(row, col))
    }

    #[must_use]
    pub fn location(&self, coord: Coord) -> Option<&Location> {
        Self::offset_of(coord).map(|i| &self.locations[i])
    }

    pub fn location_mut(&mut self, coord: Coord) -> Option<&mut Location> {
        Self::offset_of(coord).map(move |i| &mut self.locations[i])
    }

    #[must_use]
    pub fn intersection(&self, coord: Coord) -> Option<&Intersection> {
        Self::offset_of(coord).map(|i| &self.intersections[i])
    }

    fn intersection_mut(&mut self, coord: Coord) -> Option<&mut Intersection> {
        Self::offset_of(coord).map(move |i| &mut self.intersections[i])
    }

    /// Iterate over (coord, location) pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Location)> {
        Self::coords().zip(self.locations.iter())
    }

    // === Neighbourhoods ===

    /// Orthogonal neighbours: at most 4, in up/down/left/right order.
    #[must_use]
    pub fn get_adjacent_locations(&self, row: i32, col: i32) -> SmallVec<[(Coord, &Location); 4]> {
        let origin = Coord::new(row, col);
        ORTHOGONAL
            .iter()
            .filter_map(|&(dr, dc)| {
                let at = origin.offset(dr, dc);
                self.location(at).map(|loc| (at, loc))
            })
            .collect()
    }

    /// Orthogonal and diagonal neighbours: at most 8.
    #[must_use]
    pub fn get_nearby_locations(&self, row: i32, col: i32) -> SmallVec<[(Coord, &Location); 8]> {
        let origin = Coord::new(row, col);
        SURROUNDING
            .iter()
            .filter_map(|&(dr, dc)| {
                let at = origin.offset(dr, dc);
                self.location(at).map(|loc| (at, loc))
            })
            .collect()
    }

    /// One lazy ray per cardinal direction, in up/down/left/right order.
    #[must_use]
    pub fn get_projectile_locations(&self, row: i32, col: i32) -> [ProjectileRay<'_>; 4] {
        let origin = Coord::new(row, col);
        Direction::ALL.map(|direction| ProjectileRay::new(self, origin, direction))
    }

    /// Whether two cells are orthogonally adjacent.
    #[must_use]
    pub fn are_adjacent(a: Coord, b: Coord) -> bool {
        Self::contains(a) && Self::contains(b) && a.manhattan(b) == 1
    }

    // === Occupancy ===

    /// Play a site onto an empty cell.
    pub fn place_site(&mut self, at: Coord, site: EntityId, region: Region) -> Result<(), IllegalAction> {
        let location = self.location_mut(at).ok_or(IllegalAction::OffBoard(at))?;
        if location.has_site() {
            return Err(IllegalAction::SiteOccupied(at));
        }
        location.site = Some(site);
        location.region = region;
        Ok(())
    }

    /// Put a card at a position. Sites go through [`Board::place_site`].
    pub fn place(&mut self, entity: EntityId, position: Position) -> Result<(), IllegalAction> {
        match position {
            Position::Site(at) => self.place_site(at, entity, Region::Surface),
            Position::Location { at, layer } => {
                let location = self.location_mut(at).ok_or(IllegalAction::OffBoard(at))?;
                location.stack_mut(layer).push(entity);
                Ok(())
            }
            Position::Intersection(at) => {
                let intersection = self.intersection_mut(at).ok_or(IllegalAction::OffBoard(at))?;
                intersection.occupants.push(entity);
                Ok(())
            }
        }
    }

    /// Find where a card is.
    #[must_use]
    pub fn locate(&self, entity: EntityId) -> Option<Position> {
        for (at, location) in self.iter() {
            if location.site == Some(entity) {
                return Some(Position::Site(at));
            }
            for layer in [Layer::Surface, Layer::Subsurface] {
                if location.stack(layer).contains(&entity) {
                    return Some(Position::Location { at, layer });
                }
            }
        }
        Self::coords()
            .zip(self.intersections.iter())
            .find(|(_, i)| i.occupants.contains(&entity))
            .map(|(at, _)| Position::Intersection(at))
    }

    /// Take a card off the board. Returns where it was.
    pub fn remove(&mut self, entity: EntityId) -> Option<Position> {
        let position = self.locate(entity)?;
        match position {
            Position::Site(at) | Position::Location { at, .. } => {
                self.location_mut(at)?.remove(entity);
            }
            Position::Intersection(at) => {
                self.intersection_mut(at)?.occupants.retain(|&e| e != entity);
            }
        }
        Some(position)
    }

    /// Every card on the board except sites, in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = EntityId> + '_ {
        let in_cells = self
            .locations
            .iter()
            .flat_map(|l| l.surface.iter().chain(l.subsurface.iter()).copied());
        let on_corners = self.intersections.iter().flat_map(|i| i.occupants.iter().copied());
        in_cells.chain(on_corners)
    }

    /// Check structural invariants: unique indices, intersections that only
    /// reference real cells and always include their base.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut seen = rustc_hash::FxHashSet::default();
        for location in &self.locations {
            if !seen.insert(location.index) {
                return Err(InvariantViolation::GridIndexCollision { index: location.index });
            }
        }

        for (at, intersection) in Self::coords().zip(self.intersections.iter()) {
            if !intersection.borders(at) {
                return Err(InvariantViolation::DanglingIntersection { at, missing: at });
            }
            if let Some(&missing) = intersection.locations.iter().find(|c| !Self::contains(**c)) {
                return Err(InvariantViolation::DanglingIntersection { at, missing });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_row_major() {
        let board = Board::new();
        assert_eq!(board.get_location(0, 0).unwrap().index, 1);
        assert_eq!(board.get_location(0, 3).unwrap().index, 4);
        assert_eq!(board.get_location(1, 0).unwrap().index, 5);
        assert_eq!(board.get_location(4, 3).unwrap().index, 20);
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let board = Board::new();
        assert!(board.get_location(-1, 0).is_none());
        assert!(board.get_location(0, 4).is_none());
        assert!(board.get_intersection(5, 0).is_none());
    }

    #[test]
    fn test_interior_intersection() {
        let board = Board::new();
        let cells = &board.get_intersection(1, 1).unwrap().locations;
        assert_eq!(
            cells.as_slice(),
            &[Coord::new(1, 1), Coord::new(1, 2), Coord::new(2, 1), Coord::new(2, 2)]
        );
    }

    #[test]
    fn test_edge_intersections() {
        let board = Board::new();

        // Last column: south and self.
        let cells = &board.get_intersection(0, 3).unwrap().locations;
        assert_eq!(cells.as_slice(), &[Coord::new(1, 3), Coord::new(0, 3)]);

        // Last row: east and self.
        let cells = &board.get_intersection(4, 0).unwrap().locations;
        assert_eq!(cells.as_slice(), &[Coord::new(4, 1), Coord::new(4, 0)]);

        // Corner: self only.
        let cells = &board.get_intersection(4, 3).unwrap().locations;
        assert_eq!(cells.as_slice(), &[Coord::new(4, 3)]);
    }

    #[test]
    fn test_nearby_counts() {
        let board = Board::new();
        assert_eq!(board.get_nearby_locations(0, 0).len(), 3);
        assert_eq!(board.get_nearby_locations(2, 1).len(), 8);
        assert_eq!(board.get_nearby_locations(4, 1).len(), 5);
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::new();
        let at = Coord::new(2, 2);

        board.place_site(at, EntityId(10), Region::Underwater).unwrap();
        assert_eq!(
            board.place_site(at, EntityId(11), Region::Surface),
            Err(IllegalAction::SiteOccupied(at))
        );

        let pos = Position::Location { at, layer: Layer::Subsurface };
        board.place(EntityId(12), pos).unwrap();
        assert_eq!(board.locate(EntityId(12)), Some(pos));
        assert_eq!(board.locate(EntityId(10)), Some(Position::Site(at)));

        assert_eq!(board.remove(EntityId(12)), Some(pos));
        assert_eq!(board.locate(EntityId(12)), None);
    }

    #[test]
    fn test_intersection_occupants() {
        let mut board = Board::new();
        board.place(EntityId(20), Position::Intersection(Coord::new(0, 0))).unwrap();
        assert_eq!(board.occupants().collect::<Vec<_>>(), vec![EntityId(20)]);
        assert_eq!(board.remove(EntityId(20)), Some(Position::Intersection(Coord::new(0, 0))));
    }

    #[test]
    fn test_place_off_board() {
        let mut board = Board::new();
        let at = Coord::new(9, 9);
        let result = board.place(EntityId(1), Position::Location { at, layer: Layer::Surface });
        assert_eq!(result, Err(IllegalAction::OffBoard(at)));
    }
}
