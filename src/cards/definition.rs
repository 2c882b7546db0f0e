//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable catalog properties of a card name.
//! Both players' copies of a card share one definition behind an `Arc`;
//! runtime state (tapped, damage, position) lives in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::element::{Element, Thresholds};

/// Unique identifier for a card definition.
///
/// This identifies the catalog entry (e.g., "Pudge Butcher"),
/// not a specific instance in a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Printed card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Site,
    Avatar,
    Minion,
    Artifact,
    Aura,
    Magic,
}

impl CardType {
    /// Sites go in the atlas; everything else except the avatar in the spellbook.
    #[must_use]
    pub fn is_site(self) -> bool {
        matches!(self, CardType::Site)
    }

    /// Types that occupy a location or intersection once cast.
    #[must_use]
    pub fn is_permanent(self) -> bool {
        !matches!(self, CardType::Magic)
    }

    /// Types that can move and strike.
    #[must_use]
    pub fn is_unit(self) -> bool {
        matches!(self, CardType::Avatar | CardType::Minion)
    }
}

/// Geometry used when counting movement steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    /// Orthogonal steps only.
    #[default]
    Adjacent,
    /// Diagonal steps allowed.
    Nearby,
}

/// Static card definition.
///
/// ```
/// use realm_engine::cards::{CardDefinition, CardId, CardType, Thresholds};
///
/// let butcher = CardDefinition::new(CardId::new(1), "Pudge Butcher", CardType::Minion)
///     .with_cost(3)
///     .with_stats(4, 4)
///     .with_thresholds(Thresholds::new(0, 0, 1, 0))
///     .with_rules_text("Lethal");
///
/// assert_eq!(butcher.attack, 4);
/// assert_eq!(butcher.movement, 1);
/// assert!(!butcher.card_type.is_site());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    pub name: String,

    pub card_type: CardType,

    pub elements: SmallVec<[Element; 2]>,

    pub subtypes: Vec<String>,

    /// Printed rules text, tokenized into abilities when an instance is created.
    pub rules_text: String,

    /// Mana cost. Sites are free.
    pub cost: u32,

    pub attack: u32,

    pub defence: u32,

    /// Printed life, avatars only.
    pub life: Option<u32>,

    /// Casting requirement, or for a site the thresholds it provides.
    pub thresholds: Thresholds,

    /// Steps per move.
    pub movement: u32,

    /// Strike reach for ranged units.
    pub range: u32,

    pub movement_kind: MovementKind,
}

impl CardDefinition {
    /// Create a definition with zero stats, movement 1 and range 1.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            elements: SmallVec::new(),
            subtypes: Vec::new(),
            rules_text: String::new(),
            cost: 0,
            attack: 0,
            defence: 0,
            life: None,
            thresholds: Thresholds::default(),
            movement: 1,
            range: 1,
            movement_kind: MovementKind::Adjacent,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set attack and defence.
    #[must_use]
    pub fn with_stats(mut self, attack: u32, defence: u32) -> Self {
        self.attack = attack;
        self.defence = defence;
        self
    }

    #[must_use]
    pub fn with_life(mut self, life: u32) -> Self {
        self.life = Some(life);
        self
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtypes.push(subtype.into());
        self
    }

    #[must_use]
    pub fn with_rules_text(mut self, text: impl Into<String>) -> Self {
        self.rules_text = text.into();
        self
    }

    #[must_use]
    pub fn with_movement(mut self, steps: u32, kind: MovementKind) -> Self {
        self.movement = steps;
        self.movement_kind = kind;
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    /// Whether a site is a water site.
    #[must_use]
    pub fn is_water_site(&self) -> bool {
        self.card_type.is_site() && self.thresholds.water > 0
    }
}
