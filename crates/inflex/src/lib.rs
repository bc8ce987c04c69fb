//! Inflection pattern interpolation for localized strings.
//!
//! Translation strings may embed conditional fragments selected by a
//! grammatical kind (gender, number, ...) and a token value supplied at
//! render time:
//!
//! ```text
//! Dear @{m:Sir|f:Madam|All}!
//! ```
//!
//! An [`Inflector`] owns one inflection database per locale — kinds, true
//! tokens, aliases, and default tokens — and resolves such patterns against
//! the caller's option values. Tokens live either in a flat per-locale
//! namespace, or in kind-scoped strict namespaces addressed by named
//! patterns like `@gender{...}`.
//!
//! Token selection is purely a lookup of an explicit, caller-supplied
//! symbolic value against caller-declared inflection tables; there is no
//! numeric plural-rule handling here.
//!
//! Interpolation is pure and synchronous. Databases are only ever replaced
//! wholesale, so concurrent reads against a stable registry are safe as long
//! as the host serializes reloads against in-flight calls.

pub mod database;
pub mod interpreter;
pub mod loader;
pub mod parser;
pub mod types;

pub use database::{InvalidDefault, LocaleDatabase, StrictStore, TokenStore};
pub use interpreter::{InflectionError, Inflector, compute_suggestions, interpolate_template};
pub use loader::{InflectionConfig, LoadError};
pub use parser::parse_template;
pub use types::{InterpolationOptions, ModeFlags, TokenEntry};

/// Creates a `HashMap<String, String>` of requested token values.
///
/// # Example
///
/// ```
/// use inflex::tokens;
///
/// let values = tokens! { "gender" => "m", "number" => "plural" };
/// assert_eq!(values.len(), 2);
/// assert_eq!(values["gender"], "m");
/// ```
#[macro_export]
macro_rules! tokens {
    {} => {
        ::std::collections::HashMap::<String, String>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, String>::new();
            $(
                map.insert($key.to_string(), $value.to_string());
            )+
            map
        }
    };
}
