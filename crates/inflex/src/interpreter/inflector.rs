//! User-facing registry for per-locale inflection databases.

use std::cell::RefCell;
use std::collections::HashMap;

use bon::Builder;

use crate::database::LocaleDatabase;
use crate::interpreter::error::InflectionError;
use crate::interpreter::evaluator::interpolate_template;
use crate::loader::{InflectionConfig, LoadError};
use crate::parser::ast::Template;
use crate::parser::parse_template;
use crate::types::{InterpolationOptions, ModeFlags, TokenEntry};

/// Registry of per-locale inflection databases and process-wide defaults.
///
/// The registry owns one [`LocaleDatabase`] per locale and the default
/// [`ModeFlags`]; per-call options override the defaults flag by flag.
/// Databases are replaced wholesale on reload and never mutated by
/// interpolation, so concurrent reads against a stable registry are safe
/// when the host serializes reloads against in-flight calls.
///
/// # Example
///
/// ```
/// use inflex::{InflectionConfig, Inflector, InterpolationOptions, tokens};
///
/// let mut inflector = Inflector::new();
/// let config = InflectionConfig::new()
///     .with("gender", "m", "male")
///     .with("gender", "f", "female")
///     .with("gender", "n", "neuter")
///     .with("gender", "default", "n");
/// inflector.load_locale("en", &config).unwrap();
///
/// let options = InterpolationOptions::builder()
///     .values(tokens! { "gender" => "m" })
///     .build();
/// let out = inflector
///     .interpolate("Dear @{m:Sir|f:Madam|All}!", "en", &options)
///     .unwrap();
/// assert_eq!(out, "Dear Sir!");
/// ```
#[derive(Builder)]
pub struct Inflector {
    /// Process-wide default mode flags.
    #[builder(default)]
    flags: ModeFlags,

    /// Per-locale databases, each replaced atomically on reload.
    #[builder(skip)]
    databases: HashMap<String, LocaleDatabase>,

    /// Scanned pattern ASTs keyed by source string, reused across calls.
    ///
    /// Uses `RefCell` for interior mutability so `interpolate` can stay
    /// `&self`.
    #[builder(skip)]
    pattern_cache: RefCell<HashMap<String, Template>>,
}

impl Default for Inflector {
    fn default() -> Self {
        Inflector::builder().build()
    }
}

impl Inflector {
    /// Create a registry with default flags and no databases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with specific default flags.
    pub fn with_flags(flags: ModeFlags) -> Self {
        Inflector::builder().flags(flags).build()
    }

    // =========================================================================
    // Flags
    // =========================================================================

    /// The process-wide default flags.
    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    /// Replace the process-wide default flags.
    pub fn set_flags(&mut self, flags: ModeFlags) {
        self.flags = flags;
    }

    // =========================================================================
    // Database lifecycle
    // =========================================================================

    /// Build a fresh database from `config` and swap it in for `locale`,
    /// replacing (never merging with) any previous database.
    ///
    /// Returns the number of loaded token entries. On error the previous
    /// database for the locale is left untouched.
    pub fn load_locale(
        &mut self,
        locale: &str,
        config: &InflectionConfig,
    ) -> Result<usize, LoadError> {
        let db = LocaleDatabase::from_config(config)?;
        let count = db.len();
        self.databases.insert(locale.to_string(), db);
        Ok(count)
    }

    /// Swap in a prebuilt database for a locale.
    pub fn replace_database(&mut self, locale: &str, db: LocaleDatabase) {
        self.databases.insert(locale.to_string(), db);
    }

    /// Remove a locale's database, returning it if one was loaded.
    pub fn drop_locale(&mut self, locale: &str) -> Option<LocaleDatabase> {
        self.databases.remove(locale)
    }

    /// The database for a locale, if loaded.
    pub fn database(&self, locale: &str) -> Option<&LocaleDatabase> {
        self.databases.get(locale)
    }

    /// Locales with a loaded database, sorted.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.databases.keys().cloned().collect();
        locales.sort();
        locales
    }

    // =========================================================================
    // Interpolation
    // =========================================================================

    /// Interpolate every inflection pattern in `text` for `locale`.
    ///
    /// A locale with no loaded database behaves as an empty database: every
    /// pattern token is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error only when the effective `raises` flag is enabled and
    /// a pattern hits an invalid-token, misplaced-token, or missing-option
    /// condition.
    pub fn interpolate(
        &self,
        text: &str,
        locale: &str,
        options: &InterpolationOptions,
    ) -> Result<String, InflectionError> {
        let flags = options.effective_flags(self.flags);
        let empty = LocaleDatabase::new();
        let db = self.databases.get(locale).unwrap_or(&empty);
        let template = self.cached_template(text);
        interpolate_template(&template, db, &options.values, flags)
    }

    /// Clear the pattern cache.
    ///
    /// Call this to free memory used by cached pattern ASTs.
    pub fn clear_pattern_cache(&self) {
        self.pattern_cache.borrow_mut().clear();
    }

    /// Return the number of cached pattern ASTs.
    pub fn pattern_cache_len(&self) -> usize {
        self.pattern_cache.borrow().len()
    }

    /// Look up or scan and cache a template string.
    fn cached_template(&self, text: &str) -> Template {
        {
            let cache = self.pattern_cache.borrow();
            if let Some(template) = cache.get(text) {
                return template.clone();
            }
        }
        let template = parse_template(text);
        self.pattern_cache
            .borrow_mut()
            .insert(text.to_string(), template.clone());
        template
    }

    // =========================================================================
    // Introspection (loose namespace)
    // =========================================================================

    /// Known kinds for a locale.
    pub fn kinds(&self, locale: &str) -> Vec<String> {
        self.databases
            .get(locale)
            .map(|db| db.loose().kinds())
            .unwrap_or_default()
    }

    /// Descriptions for every token, aliases resolved, optionally filtered
    /// by kind.
    pub fn tokens(&self, locale: &str, kind: Option<&str>) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.loose().tokens(kind))
            .unwrap_or_default()
    }

    /// True tokens as token → description, optionally filtered by kind.
    pub fn true_tokens(&self, locale: &str, kind: Option<&str>) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.loose().true_tokens(kind))
            .unwrap_or_default()
    }

    /// Aliases as alias → target, optionally filtered by kind.
    pub fn aliases(&self, locale: &str, kind: Option<&str>) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.loose().aliases(kind))
            .unwrap_or_default()
    }

    /// Raw entries, the entry variant distinguishing true tokens from
    /// aliases, optionally filtered by kind.
    pub fn raw_tokens(&self, locale: &str, kind: Option<&str>) -> HashMap<String, TokenEntry> {
        self.databases
            .get(locale)
            .map(|db| db.loose().raw_tokens(kind))
            .unwrap_or_default()
    }

    /// Default token registered for a kind.
    pub fn default_token(&self, locale: &str, kind: &str) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.loose().default_token(kind))
            .map(ToString::to_string)
    }

    /// Description of a token, aliases resolved.
    pub fn token_description(&self, locale: &str, token: &str) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.loose().description(token))
            .map(ToString::to_string)
    }

    /// Resolve a token to its true token, optionally checking its kind.
    pub fn true_token(&self, locale: &str, token: &str, kind: Option<&str>) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.loose().true_token(token, kind))
            .map(ToString::to_string)
    }

    /// Whether any token has been added under `kind`.
    pub fn has_kind(&self, locale: &str, kind: &str) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.loose().has_kind(kind))
    }

    /// Whether `token` is any known token, optionally of the expected kind.
    pub fn has_token(&self, locale: &str, token: &str, kind: Option<&str>) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.loose().has_token(token, kind))
    }

    /// Whether `token` is a true token, optionally of the expected kind.
    pub fn has_true_token(&self, locale: &str, token: &str, kind: Option<&str>) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.loose().has_true_token(token, kind))
    }

    /// Whether `token` is an alias, optionally of the expected kind.
    pub fn has_alias(&self, locale: &str, token: &str, kind: Option<&str>) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.loose().has_alias(token, kind))
    }

    // =========================================================================
    // Introspection (strict namespaces)
    // =========================================================================

    /// Strict kind namespaces with at least one token, sorted.
    pub fn strict_kinds(&self, locale: &str) -> Vec<String> {
        self.databases
            .get(locale)
            .map(|db| db.strict().kinds())
            .unwrap_or_default()
    }

    /// Descriptions for every token of a strict kind, aliases resolved.
    pub fn strict_tokens(&self, locale: &str, kind: &str) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.strict().tokens(kind))
            .unwrap_or_default()
    }

    /// True tokens of a strict kind as token → description.
    pub fn strict_true_tokens(&self, locale: &str, kind: &str) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.strict().true_tokens(kind))
            .unwrap_or_default()
    }

    /// Aliases of a strict kind as alias → target.
    pub fn strict_aliases(&self, locale: &str, kind: &str) -> HashMap<String, String> {
        self.databases
            .get(locale)
            .map(|db| db.strict().aliases(kind))
            .unwrap_or_default()
    }

    /// Default token registered for a strict kind.
    pub fn strict_default_token(&self, locale: &str, kind: &str) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.strict().default_token(kind))
            .map(ToString::to_string)
    }

    /// Description of a strict-kind token, aliases resolved.
    pub fn strict_token_description(
        &self,
        locale: &str,
        token: &str,
        kind: &str,
    ) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.strict().description(token, kind))
            .map(ToString::to_string)
    }

    /// Resolve a strict-kind token to its true token.
    pub fn strict_true_token(&self, locale: &str, token: &str, kind: &str) -> Option<String> {
        self.databases
            .get(locale)
            .and_then(|db| db.strict().true_token(token, kind))
            .map(ToString::to_string)
    }

    /// Whether a strict kind namespace exists for a locale.
    pub fn strict_has_kind(&self, locale: &str, kind: &str) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.strict().has_kind(kind))
    }

    /// Whether `token` is a known token of a strict kind.
    pub fn strict_has_token(&self, locale: &str, token: &str, kind: &str) -> bool {
        self.databases
            .get(locale)
            .is_some_and(|db| db.strict().has_token(token, kind))
    }
}
