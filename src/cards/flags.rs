//! The per-card capability set.

use serde::{Deserialize, Serialize};

/// A passive capability granted by a keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Airborne,
    Burrowing,
    Submerge,
    Stealth,
    Lethal,
    Ranged,
    Voidwalk,
    Spellcaster,
    Immobile,
    Waterbound,
    Landbound,
    /// Enters the realm without summoning sickness.
    Charge,
    /// Never strikes back.
    NoRetaliation,
}

/// Independent booleans describing what a card can currently do.
///
/// These are a flat capability set, not a hierarchy: legality checks read
/// the specific flags they care about and nothing else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFlags {
    pub is_tapped: bool,
    pub has_summoning_sickness: bool,
    pub is_airborne: bool,
    /// Has the Submerge ability.
    pub is_submergeable: bool,
    /// Has the Burrowing ability.
    pub is_burrowable: bool,
    pub is_stealthy: bool,
    /// Standing on a land site it could burrow into.
    pub can_burrow: bool,
    /// Standing on a water site it could submerge into.
    pub can_submerge: bool,
    pub is_disabled: bool,
    pub is_immobile: bool,
    pub is_lethal: bool,
    pub is_waterbound: bool,
    pub is_landbound: bool,
    pub is_voidwalker: bool,
    pub is_spellcaster: bool,
    pub is_ranged: bool,

    /// Retaliation policy for strikes against this card.
    pub no_retaliation: bool,
    pub has_charge: bool,
}

impl CardFlags {
    /// Turn on the flag a capability controls.
    pub fn grant(&mut self, capability: Capability) {
        match capability {
            Capability::Airborne => self.is_airborne = true,
            Capability::Burrowing => self.is_burrowable = true,
            Capability::Submerge => self.is_submergeable = true,
            Capability::Stealth => self.is_stealthy = true,
            Capability::Lethal => self.is_lethal = true,
            Capability::Ranged => self.is_ranged = true,
            Capability::Voidwalk => self.is_voidwalker = true,
            Capability::Spellcaster => self.is_spellcaster = true,
            Capability::Immobile => self.is_immobile = true,
            Capability::Waterbound => self.is_waterbound = true,
            Capability::Landbound => self.is_landbound = true,
            Capability::Charge => self.has_charge = true,
            Capability::NoRetaliation => self.no_retaliation = true,
        }
    }

    /// Build a flag set from capabilities.
    #[must_use]
    pub fn from_capabilities(capabilities: impl IntoIterator<Item = Capability>) -> Self {
        let mut flags = Self::default();
        for capability in capabilities {
            flags.grant(capability);
        }
        flags
    }

    /// Drop the transient state a card loses when it leaves the realm.
    pub fn reset_transient(&mut self) {
        self.is_tapped = false;
        self.has_summoning_sickness = false;
        self.is_disabled = false;
        self.can_burrow = false;
        self.can_submerge = false;
    }
}
