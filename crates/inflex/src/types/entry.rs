use serde::{Deserialize, Serialize};

/// A single entry in an inflection store.
///
/// An entry is either a *true token* carrying its own human-readable
/// description, or an *alias* standing for a true token of the same kind.
/// Alias targets always point at true tokens (enforced at insertion), so
/// resolution is a single hop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEntry {
    /// A true token with its own description.
    True { kind: String, description: String },
    /// An alias redirecting to a true token; the kind is inherited from the
    /// target at insertion time.
    Alias { kind: String, target: String },
}

impl TokenEntry {
    /// The kind this entry belongs to.
    pub fn kind(&self) -> &str {
        match self {
            TokenEntry::True { kind, .. } | TokenEntry::Alias { kind, .. } => kind,
        }
    }

    /// Whether this entry is a true token.
    pub fn is_true(&self) -> bool {
        matches!(self, TokenEntry::True { .. })
    }

    /// Whether this entry is an alias.
    pub fn is_alias(&self) -> bool {
        matches!(self, TokenEntry::Alias { .. })
    }

    /// The description, for true tokens only. Alias descriptions are derived
    /// by resolving the alias first.
    pub fn description(&self) -> Option<&str> {
        match self {
            TokenEntry::True { description, .. } => Some(description),
            TokenEntry::Alias { .. } => None,
        }
    }

    /// The alias target, for aliases only.
    pub fn target(&self) -> Option<&str> {
        match self {
            TokenEntry::True { .. } => None,
            TokenEntry::Alias { target, .. } => Some(target),
        }
    }
}
