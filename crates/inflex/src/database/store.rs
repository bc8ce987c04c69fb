//! Flat (loose-mode) inflection token storage.

use std::collections::{HashMap, HashSet};

use crate::types::TokenEntry;

/// A default-token registration that does not resolve to a true token of its
/// kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDefault {
    pub kind: String,
    pub target: String,
}

/// Flat-namespace inflection store.
///
/// Tokens of every kind share a single name space; the loader rejects
/// cross-kind name collisions before they reach this store. The strict-mode
/// variant namespaces one `TokenStore` per kind (see
/// [`StrictStore`](super::StrictStore)).
///
/// All lookups return explicit misses; there are no implicit default values
/// baked into the containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStore {
    tokens: HashMap<String, TokenEntry>,
    kinds: HashSet<String>,
    defaults: HashMap<String, String>,
}

impl TokenStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Insert or overwrite a true token and register its kind.
    ///
    /// Overwriting is intentional: reloads replace entries in place while a
    /// fresh store is being built.
    pub fn add_token(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) {
        let kind = kind.into();
        self.kinds.insert(kind.clone());
        self.tokens.insert(
            name.into(),
            TokenEntry::True {
                kind,
                description: description.into(),
            },
        );
    }

    /// Insert or overwrite an alias pointing at `target`.
    ///
    /// Returns `false` without mutating when `name` or `target` is empty,
    /// `target` is not a known true token, or a supplied `kind` disagrees
    /// with the target's kind. Requiring a true-token target keeps alias
    /// chains single-hop.
    pub fn add_alias(&mut self, name: &str, target: &str, kind: Option<&str>) -> bool {
        if name.is_empty() || target.is_empty() {
            return false;
        }
        let Some(TokenEntry::True {
            kind: target_kind, ..
        }) = self.tokens.get(target)
        else {
            return false;
        };
        if kind.is_some_and(|k| k != target_kind) {
            return false;
        }
        let entry = TokenEntry::Alias {
            kind: target_kind.clone(),
            target: target.to_string(),
        };
        self.tokens.insert(name.to_string(), entry);
        true
    }

    /// Record the default token for a kind.
    ///
    /// Aliases are resolved to their true token when already resolvable;
    /// [`validate_defaults`](Self::validate_defaults) re-resolves whatever
    /// was stored once the bulk load is complete.
    pub fn set_default_token(&mut self, kind: impl Into<String>, target: &str) {
        let kind = kind.into();
        let resolved = match self.true_token(target, Some(kind.as_str())) {
            Some(token) => token.to_string(),
            None => target.to_string(),
        };
        self.defaults.insert(kind, resolved);
    }

    /// Resolve every registered default through the alias chain and rewrite
    /// it to the resolved true token.
    ///
    /// Returns the offending (kind, raw target) pair when a default does not
    /// resolve. Running it again after success is a no-op.
    pub fn validate_defaults(&mut self) -> Result<(), InvalidDefault> {
        let mut kinds: Vec<String> = self.defaults.keys().cloned().collect();
        kinds.sort();
        for kind in kinds {
            let Some(target) = self.defaults.get(&kind).cloned() else {
                continue;
            };
            match self.true_token(&target, Some(&kind)) {
                Some(resolved) => {
                    let resolved = resolved.to_string();
                    self.defaults.insert(kind, resolved);
                }
                None => return Err(InvalidDefault { kind, target }),
            }
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Kind of a token (true token or alias).
    pub fn kind_of(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(TokenEntry::kind)
    }

    /// Resolve a token to its true token: identity for true tokens, one hop
    /// for aliases. `None` when the token is unknown, its target dangles, or
    /// the kind filter disagrees.
    pub fn true_token(&self, name: &str, kind: Option<&str>) -> Option<&str> {
        let (stored, entry) = self.tokens.get_key_value(name)?;
        if kind.is_some_and(|k| k != entry.kind()) {
            return None;
        }
        let target = match entry {
            TokenEntry::True { .. } => return Some(stored.as_str()),
            TokenEntry::Alias { target, .. } => target,
        };
        match self.tokens.get_key_value(target) {
            Some((resolved, TokenEntry::True { .. })) => Some(resolved.as_str()),
            _ => None,
        }
    }

    /// Description of a token, resolving aliases to their target.
    pub fn description(&self, name: &str) -> Option<&str> {
        let resolved = self.true_token(name, None)?;
        self.tokens.get(resolved).and_then(TokenEntry::description)
    }

    /// Default token registered for a kind.
    pub fn default_token(&self, kind: &str) -> Option<&str> {
        self.defaults.get(kind).map(String::as_str)
    }

    /// Whether any token has been added under `kind`.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Whether a default token has been registered for `kind`.
    pub fn has_default_token(&self, kind: &str) -> bool {
        self.defaults.contains_key(kind)
    }

    /// Whether `name` is any known token, optionally of the expected kind.
    /// A kind mismatch answers `false`, never an error.
    pub fn has_token(&self, name: &str, kind: Option<&str>) -> bool {
        self.tokens
            .get(name)
            .is_some_and(|e| kind.is_none_or(|k| k == e.kind()))
    }

    /// Whether `name` is a true token, optionally of the expected kind.
    pub fn has_true_token(&self, name: &str, kind: Option<&str>) -> bool {
        self.tokens
            .get(name)
            .is_some_and(|e| e.is_true() && kind.is_none_or(|k| k == e.kind()))
    }

    /// Whether `name` is an alias, optionally of the expected kind.
    pub fn has_alias(&self, name: &str, kind: Option<&str>) -> bool {
        self.tokens
            .get(name)
            .is_some_and(|e| e.is_alias() && kind.is_none_or(|k| k == e.kind()))
    }

    // =========================================================================
    // Bulk readers
    // =========================================================================

    /// Known kind names, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.kinds.iter().cloned().collect();
        kinds.sort();
        kinds
    }

    /// All known token names (true tokens and aliases), sorted.
    pub fn token_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tokens.keys().cloned().collect();
        names.sort();
        names
    }

    /// True tokens as token → description, optionally filtered by kind.
    pub fn true_tokens(&self, kind: Option<&str>) -> HashMap<String, String> {
        self.tokens
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| k == e.kind()))
            .filter_map(|(name, e)| match e {
                TokenEntry::True { description, .. } => {
                    Some((name.clone(), description.clone()))
                }
                TokenEntry::Alias { .. } => None,
            })
            .collect()
    }

    /// Aliases as alias → target, optionally filtered by kind.
    pub fn aliases(&self, kind: Option<&str>) -> HashMap<String, String> {
        self.tokens
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| k == e.kind()))
            .filter_map(|(name, e)| match e {
                TokenEntry::Alias { target, .. } => Some((name.clone(), target.clone())),
                TokenEntry::True { .. } => None,
            })
            .collect()
    }

    /// Raw entries (true token → description, alias → target), optionally
    /// filtered by kind. The entry variant distinguishes the two.
    pub fn raw_tokens(&self, kind: Option<&str>) -> HashMap<String, TokenEntry> {
        self.tokens
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| k == e.kind()))
            .map(|(name, e)| (name.clone(), e.clone()))
            .collect()
    }

    /// Descriptions for every token with aliases resolved, optionally
    /// filtered by kind. Aliases with dangling targets are omitted.
    pub fn tokens(&self, kind: Option<&str>) -> HashMap<String, String> {
        self.tokens
            .iter()
            .filter(|(_, e)| kind.is_none_or(|k| k == e.kind()))
            .filter_map(|(name, _)| {
                self.description(name)
                    .map(|d| (name.clone(), d.to_string()))
            })
            .collect()
    }

    /// Number of registered tokens (true tokens and aliases).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True iff no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
