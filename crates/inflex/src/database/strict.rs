//! Kind-namespaced (strict-mode) inflection storage.

use std::collections::HashMap;

use super::store::{InvalidDefault, TokenStore};
use crate::types::TokenEntry;

/// Strict-mode storage: one flat [`TokenStore`] per declared kind.
///
/// The kind participates in token identity, so the same token name may exist
/// under several kinds without conflict. Named patterns (`@gender{...}`)
/// resolve against the sub-database of their kind and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrictStore {
    stores: HashMap<String, TokenStore>,
}

impl StrictStore {
    /// Create a new empty strict store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-database scoped to a kind.
    pub fn store(&self, kind: &str) -> Option<&TokenStore> {
        self.stores.get(kind)
    }

    // =========================================================================
    // Population
    // =========================================================================

    /// Insert or overwrite a true token under a kind namespace.
    pub fn add_token(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) {
        let kind = kind.into();
        self.stores
            .entry(kind.clone())
            .or_default()
            .add_token(name, kind, description);
    }

    /// Insert or overwrite an alias within a kind namespace. The target must
    /// be a known true token of the same kind.
    pub fn add_alias(&mut self, name: &str, target: &str, kind: &str) -> bool {
        match self.stores.get_mut(kind) {
            Some(store) => store.add_alias(name, target, Some(kind)),
            None => false,
        }
    }

    /// Record the default token for a kind namespace.
    pub fn set_default_token(&mut self, kind: &str, target: &str) {
        self.stores
            .entry(kind.to_string())
            .or_default()
            .set_default_token(kind, target);
    }

    /// Validate and rewrite the defaults of every kind namespace.
    pub fn validate_defaults(&mut self) -> Result<(), InvalidDefault> {
        let mut kinds: Vec<String> = self.stores.keys().cloned().collect();
        kinds.sort();
        for kind in kinds {
            if let Some(store) = self.stores.get_mut(&kind) {
                store.validate_defaults()?;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether any token has been added under `kind`.
    pub fn has_kind(&self, kind: &str) -> bool {
        self.stores.get(kind).is_some_and(|s| s.has_kind(kind))
    }

    /// Whether `name` is a known token of `kind`.
    pub fn has_token(&self, name: &str, kind: &str) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|s| s.has_token(name, Some(kind)))
    }

    /// Whether `name` is a true token of `kind`.
    pub fn has_true_token(&self, name: &str, kind: &str) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|s| s.has_true_token(name, Some(kind)))
    }

    /// Whether `name` is an alias of `kind`.
    pub fn has_alias(&self, name: &str, kind: &str) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|s| s.has_alias(name, Some(kind)))
    }

    /// Whether a default token has been registered for `kind`.
    pub fn has_default_token(&self, kind: &str) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|s| s.has_default_token(kind))
    }

    /// Resolve a token of `kind` to its true token.
    pub fn true_token(&self, name: &str, kind: &str) -> Option<&str> {
        self.stores.get(kind)?.true_token(name, Some(kind))
    }

    /// Description of a token of `kind`, resolving aliases.
    pub fn description(&self, name: &str, kind: &str) -> Option<&str> {
        self.stores.get(kind)?.description(name)
    }

    /// Default token registered for `kind`.
    pub fn default_token(&self, kind: &str) -> Option<&str> {
        self.stores.get(kind)?.default_token(kind)
    }

    // =========================================================================
    // Bulk readers
    // =========================================================================

    /// Kind namespaces with at least one token, sorted.
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self
            .stores
            .iter()
            .filter(|(kind, store)| store.has_kind(kind))
            .map(|(kind, _)| kind.clone())
            .collect();
        kinds.sort();
        kinds
    }

    /// Descriptions for every token of `kind`, aliases resolved.
    pub fn tokens(&self, kind: &str) -> HashMap<String, String> {
        self.stores
            .get(kind)
            .map(|s| s.tokens(Some(kind)))
            .unwrap_or_default()
    }

    /// True tokens of `kind` as token → description.
    pub fn true_tokens(&self, kind: &str) -> HashMap<String, String> {
        self.stores
            .get(kind)
            .map(|s| s.true_tokens(Some(kind)))
            .unwrap_or_default()
    }

    /// Aliases of `kind` as alias → target.
    pub fn aliases(&self, kind: &str) -> HashMap<String, String> {
        self.stores
            .get(kind)
            .map(|s| s.aliases(Some(kind)))
            .unwrap_or_default()
    }

    /// Raw entries of `kind`, the entry variant distinguishing true tokens
    /// from aliases.
    pub fn raw_tokens(&self, kind: &str) -> HashMap<String, TokenEntry> {
        self.stores
            .get(kind)
            .map(|s| s.raw_tokens(Some(kind)))
            .unwrap_or_default()
    }

    /// Number of registered tokens across every kind namespace.
    pub fn len(&self) -> usize {
        self.stores.values().map(TokenStore::len).sum()
    }

    /// True iff no kind namespace holds any token.
    pub fn is_empty(&self) -> bool {
        self.stores.values().all(TokenStore::is_empty)
    }
}
