//! Board topology: the realm grid, intersections and spatial queries.
//!
//! ## Key Types
//!
//! - [`Board`]: the fixed 5×4 grid of [`Location`]s and derived [`Intersection`]s
//! - [`Coord`]: a signed cell address; off-board coordinates are representable
//!   and rejected by lookups instead of panicking
//! - [`ProjectileRay`]: a lazy, restartable line of fire in one direction
//! - [`Position`]: where a card sits (site, surface/subsurface stack, intersection)
//!
//! The board has no rules knowledge. Legality lives in `cards::legality`.

mod coord;
mod location;
mod ray;
mod topology;

pub use coord::{Coord, Layer, Position};
pub use location::{Intersection, Location, Region};
pub use ray::{Direction, ProjectileRay};
pub use topology::Board;
