//! Declarative inflection configuration and database building.
//!
//! [`InflectionConfig`] is the shape hosts feed from their translation data
//! (any serde format): kind name → token name → value. Conventions:
//! - a value starting with `@` declares an alias to the named target
//! - the reserved token name `default` declares the kind's default token
//! - a kind name starting with `@` declares a strict kind
//!
//! Loading always builds a fresh database and validates defaults before the
//! result becomes visible; a failed load leaves nothing behind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{InvalidDefault, LocaleDatabase};

/// Marker prefix declaring an alias value (`"@m"`) or a strict kind name
/// (`"@gender"`).
pub const ALIAS_MARKER: char = '@';
/// Reserved token name declaring a kind's default token.
pub const DEFAULT_KEY: &str = "default";

/// A load-time data-integrity failure.
///
/// These are raised unconditionally while building a database, never gated
/// by the `raises` interpolation flag. A failed load aborts the whole locale
/// and the previous database stays in place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The same token name was declared under two loose kinds.
    #[error(
        "inflection token '{token}' of kind '{kind}' was already declared under kind '{original}'"
    )]
    DuplicatedToken {
        token: String,
        kind: String,
        original: String,
    },

    /// An alias declaration pointing at an unknown or cross-kind target.
    #[error("inflection alias '{alias}' of kind '{kind}' does not point at a true token ('{target}')")]
    BadAlias {
        alias: String,
        kind: String,
        target: String,
    },

    /// A token declaration with an empty name or empty description.
    #[error("bad inflection token '{token}' of kind '{kind}'")]
    BadToken { token: String, kind: String },

    /// A kind declaration with an empty name.
    #[error("bad inflection kind '{kind}'")]
    BadKind { kind: String },

    /// A default token that does not resolve to a true token of its kind.
    #[error("default token '{target}' of kind '{kind}' does not resolve to a true token")]
    BadDefault { kind: String, target: String },
}

impl From<InvalidDefault> for LoadError {
    fn from(invalid: InvalidDefault) -> Self {
        LoadError::BadDefault {
            kind: invalid.kind,
            target: invalid.target,
        }
    }
}

/// Declarative inflection data for one locale.
///
/// Ordered maps keep loading deterministic regardless of the serde format
/// the host read it from.
///
/// # Example
///
/// ```
/// use inflex::{InflectionConfig, LocaleDatabase};
///
/// let config = InflectionConfig::new()
///     .with("gender", "m", "male")
///     .with("gender", "masculine", "@m")
///     .with("gender", "default", "m");
/// let db = LocaleDatabase::from_config(&config).unwrap();
/// assert_eq!(db.loose().default_token("gender"), Some("m"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InflectionConfig {
    kinds: BTreeMap<String, BTreeMap<String, String>>,
}

impl InflectionConfig {
    /// An empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable declaration helper.
    pub fn with(mut self, kind: &str, token: &str, value: &str) -> Self {
        self.kinds
            .entry(kind.to_string())
            .or_default()
            .insert(token.to_string(), value.to_string());
        self
    }

    /// Declared kind names in load order (strict kinds keep their marker).
    pub fn kind_names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// True iff no kind is declared.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl LocaleDatabase {
    /// Build a fresh database from a declarative configuration.
    ///
    /// True tokens are inserted before aliases so alias targets always exist
    /// when checked, then defaults are recorded and validated. Any failure
    /// aborts the whole build.
    pub fn from_config(config: &InflectionConfig) -> Result<Self, LoadError> {
        let mut db = LocaleDatabase::new();
        for (declared, entries) in &config.kinds {
            match declared.strip_prefix(ALIAS_MARKER) {
                Some(kind) => load_strict_kind(&mut db, kind, entries)?,
                None => load_loose_kind(&mut db, declared, entries)?,
            }
        }
        db.loose_mut().validate_defaults()?;
        db.strict_mut().validate_defaults()?;
        Ok(db)
    }
}

fn load_loose_kind(
    db: &mut LocaleDatabase,
    kind: &str,
    entries: &BTreeMap<String, String>,
) -> Result<(), LoadError> {
    if kind.is_empty() {
        return Err(LoadError::BadKind {
            kind: kind.to_string(),
        });
    }
    for (token, value) in entries {
        if token == DEFAULT_KEY || value.starts_with(ALIAS_MARKER) {
            continue;
        }
        check_entry(token, value, kind)?;
        // cross-kind name collisions are forbidden in the flat namespace
        if let Some(original) = db.loose().kind_of(token)
            && original != kind
        {
            return Err(LoadError::DuplicatedToken {
                token: token.clone(),
                kind: kind.to_string(),
                original: original.to_string(),
            });
        }
        db.loose_mut().add_token(token, kind, value);
    }
    for (token, value) in entries {
        let Some(target) = value.strip_prefix(ALIAS_MARKER) else {
            continue;
        };
        if token == DEFAULT_KEY {
            continue;
        }
        if let Some(original) = db.loose().kind_of(token)
            && original != kind
        {
            return Err(LoadError::DuplicatedToken {
                token: token.clone(),
                kind: kind.to_string(),
                original: original.to_string(),
            });
        }
        if !db.loose_mut().add_alias(token, target, Some(kind)) {
            return Err(LoadError::BadAlias {
                alias: token.clone(),
                kind: kind.to_string(),
                target: target.to_string(),
            });
        }
    }
    if let Some(target) = entries.get(DEFAULT_KEY) {
        db.loose_mut().set_default_token(kind, target);
    }
    Ok(())
}

fn load_strict_kind(
    db: &mut LocaleDatabase,
    kind: &str,
    entries: &BTreeMap<String, String>,
) -> Result<(), LoadError> {
    if kind.is_empty() {
        return Err(LoadError::BadKind {
            kind: format!("{ALIAS_MARKER}{kind}"),
        });
    }
    for (token, value) in entries {
        if token == DEFAULT_KEY || value.starts_with(ALIAS_MARKER) {
            continue;
        }
        check_entry(token, value, kind)?;
        db.strict_mut().add_token(token, kind, value);
    }
    for (token, value) in entries {
        let Some(target) = value.strip_prefix(ALIAS_MARKER) else {
            continue;
        };
        if token == DEFAULT_KEY {
            continue;
        }
        if !db.strict_mut().add_alias(token, target, kind) {
            return Err(LoadError::BadAlias {
                alias: token.clone(),
                kind: kind.to_string(),
                target: target.to_string(),
            });
        }
    }
    if let Some(target) = entries.get(DEFAULT_KEY) {
        db.strict_mut().set_default_token(kind, target);
    }
    Ok(())
}

fn check_entry(token: &str, value: &str, kind: &str) -> Result<(), LoadError> {
    if token.is_empty() || value.is_empty() {
        return Err(LoadError::BadToken {
            token: token.to_string(),
            kind: kind.to_string(),
        });
    }
    Ok(())
}
