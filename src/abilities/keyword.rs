//! Rules-text tokenizing.
//!
//! Printed rules text is split into clauses (by line and sentence). A clause
//! contributes ability keys when it is a comma-separated keyword list
//! ("Airborne, Lethal") or starts with a keyword followed by an arrow or
//! colon ("Genesis → Draw a spell."). Everything else is free text.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Capability;

/// Keywords granting a passive capability.
pub const PASSIVE_KEYWORDS: [(&str, Capability); 12] = [
    ("airborne", Capability::Airborne),
    ("burrowing", Capability::Burrowing),
    ("submerge", Capability::Submerge),
    ("stealth", Capability::Stealth),
    ("lethal", Capability::Lethal),
    ("ranged", Capability::Ranged),
    ("voidwalk", Capability::Voidwalk),
    ("spellcaster", Capability::Spellcaster),
    ("immobile", Capability::Immobile),
    ("waterbound", Capability::Waterbound),
    ("landbound", Capability::Landbound),
    ("charge", Capability::Charge),
];

/// Triggered when the card enters the realm.
pub const GENESIS: &str = "genesis";
/// Triggered when the card dies.
pub const DEATHRITE: &str = "deathrite";
/// Activated by tapping the card.
pub const TAP: &str = "tap";
/// The storyline event of a cast magic spell. Not a printed keyword.
pub const CAST: &str = "cast";

/// Tokenized rules text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesText {
    /// Recognized ability keys, lowercased, in printed order, without repeats.
    pub abilities: SmallVec<[String; 4]>,

    /// Unrecognized text, clauses joined by ". ".
    pub remainder: String,
}

impl RulesText {
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.abilities.iter().any(|a| a == key)
    }

    fn push_ability(&mut self, key: String) {
        if !self.has(&key) {
            self.abilities.push(key);
        }
    }

    fn push_remainder(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if !self.remainder.is_empty() {
            self.remainder.push_str(". ");
        }
        self.remainder.push_str(text);
    }
}

/// Registry key for a printed word.
#[must_use]
pub fn normalize(word: &str) -> String {
    let key = word.trim().to_lowercase();
    if key == "t" {
        TAP.to_string()
    } else {
        key
    }
}

/// Split a clause at its first arrow or colon.
fn split_head(clause: &str) -> Option<(&str, &str)> {
    ["→", "->", ":"]
        .iter()
        .filter_map(|sep| clause.find(sep).map(|i| (i, sep.len())))
        .min_by_key(|(i, _)| *i)
        .map(|(i, len)| (&clause[..i], &clause[i + len..]))
}

/// Tokenize rules text against the set of known ability keys.
///
/// ```
/// use realm_engine::abilities::tokenize;
///
/// let known = |k: &str| matches!(k, "airborne" | "genesis");
/// let rules = tokenize("Airborne\r\n \r\nGenesis → Draw a spell.", known);
/// assert_eq!(rules.abilities.as_slice(), &["airborne".to_string(), "genesis".to_string()]);
/// assert_eq!(rules.remainder, "Draw a spell");
/// ```
pub fn tokenize(text: &str, is_known: impl Fn(&str) -> bool) -> RulesText {
    let mut rules = RulesText::default();

    for clause in text.split(['\n', '.', ';']).map(str::trim).filter(|c| !c.is_empty()) {
        let words: SmallVec<[String; 4]> = clause.split(',').map(normalize).collect();
        if words.iter().all(|w| is_known(w)) {
            for word in words {
                rules.push_ability(word);
            }
            continue;
        }

        match split_head(clause) {
            Some((head, body)) if is_known(&normalize(head)) => {
                rules.push_ability(normalize(head));
                rules.push_remainder(body);
            }
            _ => rules.push_remainder(clause),
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin(key: &str) -> bool {
        PASSIVE_KEYWORDS.iter().any(|(k, _)| *k == key) || matches!(key, GENESIS | DEATHRITE | TAP)
    }

    #[test]
    fn test_keyword_list() {
        let rules = tokenize("Airborne, Lethal", builtin);
        assert_eq!(rules.abilities.as_slice(), &["airborne".to_string(), "lethal".to_string()]);
        assert!(rules.remainder.is_empty());
    }

    #[test]
    fn test_free_text_only() {
        let rules = tokenize("Damage dealt by Blood Ravens' strikes heals you.", builtin);
        assert!(rules.abilities.is_empty());
        assert_eq!(rules.remainder, "Damage dealt by Blood Ravens' strikes heals you");
    }

    #[test]
    fn test_tap_ability() {
        let rules = tokenize("T → Deal 1 damage to target minion", builtin);
        assert!(rules.has(TAP));
        assert_eq!(rules.remainder, "Deal 1 damage to target minion");
    }

    #[test]
    fn test_unknown_head_is_remainder() {
        let rules = tokenize("Flood: all sites become water", builtin);
        assert!(rules.abilities.is_empty());
        assert_eq!(rules.remainder, "Flood: all sites become water");
    }

    #[test]
    fn test_no_duplicates() {
        let rules = tokenize("Airborne\nAirborne", builtin);
        assert_eq!(rules.abilities.len(), 1);
    }
}
