//! Grid coordinates and on-board positions.

use serde::{Deserialize, Serialize};

/// A cell address on the realm grid.
///
/// Coordinates are signed so that off-board neighbours can be expressed
/// and rejected by bounds checks instead of overflowing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The coordinate shifted by a delta.
    #[must_use]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    /// Orthogonal step count.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> u32 {
        (self.row - other.row).unsigned_abs() + (self.col - other.col).unsigned_abs()
    }

    /// Step count when diagonal steps are allowed.
    #[must_use]
    pub fn chebyshev(self, other: Coord) -> u32 {
        (self.row - other.row)
            .unsigned_abs()
            .max((self.col - other.col).unsigned_abs())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which stack of a location a card occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// On the site: visible, can block and be struck normally.
    Surface,
    /// Submerged or burrowed beneath the site.
    Subsurface,
}

/// Where a card sits on the realm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// The site card of a location.
    Site(Coord),
    /// In one of a location's spell stacks.
    Location { at: Coord, layer: Layer },
    /// On the intersection whose base cell is `at`.
    Intersection(Coord),
}

impl Position {
    /// The base cell of this position.
    #[must_use]
    pub fn coord(self) -> Coord {
        match self {
            Position::Site(at) | Position::Intersection(at) => at,
            Position::Location { at, .. } => at,
        }
    }

    /// Whether a card here occupies the surface of its cell.
    #[must_use]
    pub fn is_surface(self) -> bool {
        matches!(self, Position::Location { layer: Layer::Surface, .. })
    }
}
