//! Grid cells and intersections.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::{Coord, Layer};
use crate::core::EntityId;

/// Terrain tag of a location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// A land site.
    Surface,
    /// A water site. Waterbound cards live here; landbound cards may not enter.
    Underwater,
    /// A land site whose subsurface is open to burrowers.
    Underground,
    /// No site has been played here.
    #[default]
    Void,
}

impl Region {
    #[must_use]
    pub fn is_water(self) -> bool {
        matches!(self, Region::Underwater)
    }

    #[must_use]
    pub fn is_void(self) -> bool {
        matches!(self, Region::Void)
    }
}

/// One grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 1-based row-major index, unique on the board.
    pub index: u32,

    /// Terrain tag.
    pub region: Region,

    /// The site card played here, if any.
    pub site: Option<EntityId>,

    /// Cards on the site, bottom to top.
    pub surface: Vec<EntityId>,

    /// Submerged or burrowed cards, bottom to top.
    pub subsurface: Vec<EntityId>,
}

impl Location {
    pub(crate) fn new(index: u32) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// The stack for a layer.
    #[must_use]
    pub fn stack(&self, layer: Layer) -> &[EntityId] {
        match layer {
            Layer::Surface => &self.surface,
            Layer::Subsurface => &self.subsurface,
        }
    }

    pub(crate) fn stack_mut(&mut self, layer: Layer) -> &mut Vec<EntityId> {
        match layer {
            Layer::Surface => &mut self.surface,
            Layer::Subsurface => &mut self.subsurface,
        }
    }

    /// Whether a site has been played here.
    #[must_use]
    pub fn has_site(&self) -> bool {
        self.site.is_some()
    }

    /// Remove an entity from whichever stack holds it.
    pub(crate) fn remove(&mut self, entity: EntityId) -> Option<Layer> {
        if self.site == Some(entity) {
            self.site = None;
            self.region = Region::Void;
            return Some(Layer::Surface);
        }
        for layer in [Layer::Surface, Layer::Subsurface] {
            let stack = self.stack_mut(layer);
            if let Some(pos) = stack.iter().position(|&e| e == entity) {
                stack.remove(pos);
                return Some(layer);
            }
        }
        None
    }
}

/// A corner point bordering one to four locations.
///
/// Large minions and auras sit here and affect every bordering cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intersection {
    /// Bordering cells. Always contains the base cell.
    pub locations: SmallVec<[Coord; 4]>,

    /// Cards occupying the intersection.
    pub occupants: Vec<EntityId>,
}

impl Intersection {
    pub(crate) fn new(locations: SmallVec<[Coord; 4]>) -> Self {
        Self {
            locations,
            occupants: Vec::new(),
        }
    }

    /// Whether this intersection borders `coord`.
    #[must_use]
    pub fn borders(&self, coord: Coord) -> bool {
        self.locations.contains(&coord)
    }
}
