//! Elements and elemental thresholds.

use serde::{Deserialize, Serialize};

/// One of the four elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Air,
    Earth,
    Fire,
    Water,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Air, Element::Earth, Element::Fire, Element::Water];
}

/// Per-element counters.
///
/// On a card this is the requirement to cast it (or, for a site, what it
/// provides). On a player it is the sum provided by controlled sites.
///
/// ```
/// use realm_engine::cards::{Element, Thresholds};
///
/// let have = Thresholds::new(1, 0, 2, 0);
/// assert!(have.covers(&Thresholds::new(0, 0, 2, 0)));
/// assert_eq!(
///     have.shortfall(&Thresholds::new(0, 1, 0, 0)),
///     Some((Element::Earth, 1, 0))
/// );
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub air: u32,
    pub earth: u32,
    pub fire: u32,
    pub water: u32,
}

impl Thresholds {
    #[must_use]
    pub const fn new(air: u32, earth: u32, fire: u32, water: u32) -> Self {
        Self { air, earth, fire, water }
    }

    #[must_use]
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Air => self.air,
            Element::Earth => self.earth,
            Element::Fire => self.fire,
            Element::Water => self.water,
        }
    }

    /// Add another set of counters.
    pub fn add(&mut self, other: &Thresholds) {
        self.air += other.air;
        self.earth += other.earth;
        self.fire += other.fire;
        self.water += other.water;
    }

    /// First element where `self` falls short of `required`, as
    /// `(element, required, available)`.
    #[must_use]
    pub fn shortfall(&self, required: &Thresholds) -> Option<(Element, u32, u32)> {
        Element::ALL.into_iter().find_map(|element| {
            let need = required.get(element);
            let have = self.get(element);
            (have < need).then_some((element, need, have))
        })
    }

    #[must_use]
    pub fn covers(&self, required: &Thresholds) -> bool {
        self.shortfall(required).is_none()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
