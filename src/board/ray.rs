//! Projectile lines of fire.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::location::Location;
use super::topology::Board;

/// A cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in ray order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Row and column delta for one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A lazy walk from an origin to the board edge in one direction.
///
/// The origin itself is never yielded. Cloning the ray, or calling
/// [`ProjectileRay::restart`], walks it again from the first step.
///
/// ```
/// use realm_engine::board::{Board, Coord, Direction};
///
/// let board = Board::new();
/// let [up, ..] = board.get_projectile_locations(2, 1);
/// assert_eq!(up.direction(), Direction::Up);
/// let cells: Vec<Coord> = up.map(|(at, _)| at).collect();
/// assert_eq!(cells, vec![Coord::new(1, 1), Coord::new(0, 1)]);
/// ```
#[derive(Clone, Debug)]
pub struct ProjectileRay<'a> {
    board: &'a Board,
    origin: Coord,
    direction: Direction,
    step: i32,
}

impl<'a> ProjectileRay<'a> {
    pub(crate) fn new(board: &'a Board, origin: Coord, direction: Direction) -> Self {
        Self {
            board,
            origin,
            direction,
            step: 0,
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Rewind to the first step.
    pub fn restart(&mut self) {
        self.step = 0;
    }
}

impl<'a> Iterator for ProjectileRay<'a> {
    type Item = (Coord, &'a Location);

    fn next(&mut self) -> Option<Self::Item> {
        let (dr, dc) = self.direction.delta();
        let next = self.origin.offset(dr * (self.step + 1), dc * (self.step + 1));
        let location = self.board.location(next)?;
        self.step += 1;
        Some((next, location))
    }
}

impl FusedIterator for ProjectileRay<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_excludes_origin_and_stops_at_edge() {
        let board = Board::new();
        let [_, down, _, right] = board.get_projectile_locations(0, 0);

        let down: Vec<_> = down.map(|(at, _)| at).collect();
        assert_eq!(down.len(), 4);
        assert_eq!(down[0], Coord::new(1, 0));
        assert_eq!(down[3], Coord::new(4, 0));

        let right: Vec<_> = right.map(|(at, _)| at).collect();
        assert_eq!(right, vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3)]);
    }

    #[test]
    fn test_ray_restart() {
        let board = Board::new();
        let [_, _, _, mut right] = board.get_projectile_locations(1, 0);

        let first: Vec<_> = right.by_ref().map(|(at, _)| at).collect();
        assert!(right.next().is_none());

        right.restart();
        let second: Vec<_> = right.map(|(at, _)| at).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ray_from_edge_is_empty() {
        let board = Board::new();
        let [up, _, left, _] = board.get_projectile_locations(0, 0);
        assert_eq!(up.count(), 0);
        assert_eq!(left.count(), 0);
    }
}
