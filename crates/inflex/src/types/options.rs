use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Interpolation behavior switches.
///
/// An `Inflector` carries one `ModeFlags` value as its process-wide default;
/// every flag can be overridden per call through [`InterpolationOptions`].
///
/// # Example
///
/// ```
/// use inflex::ModeFlags;
///
/// let flags = ModeFlags::builder().raises(true).build();
/// assert!(flags.raises);
/// assert!(flags.unknown_defaults);
/// ```
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    /// Turn invalid-token, misplaced-token, and missing-option conditions
    /// into errors instead of skipping the offending pattern step.
    #[builder(default = false)]
    pub raises: bool,

    /// Fall back to the kind's default token when the requested option is
    /// missing, empty, or unrecognized.
    #[builder(default = true)]
    pub unknown_defaults: bool,

    /// When no group matches but the requested option names a known token,
    /// prefer the default token's group value over the free-text fallback.
    #[builder(default = false)]
    pub excluded_defaults: bool,

    /// Resolve alias tokens to their true token before matching pattern
    /// group tokens.
    #[builder(default = false)]
    pub aliased_patterns: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        ModeFlags::builder().build()
    }
}

/// Per-call interpolation inputs: requested token values keyed by kind name,
/// plus optional overrides for each mode flag.
///
/// # Example
///
/// ```
/// use inflex::{InterpolationOptions, ModeFlags, tokens};
///
/// let options = InterpolationOptions::builder()
///     .values(tokens! { "gender" => "f" })
///     .raises(true)
///     .build();
///
/// let flags = options.effective_flags(ModeFlags::default());
/// assert!(flags.raises);
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpolationOptions {
    /// Requested token values keyed by kind name (`"gender"`), or by the
    /// strict-override form (`"@gender"`) addressed by named patterns.
    #[builder(default)]
    pub values: HashMap<String, String>,

    /// Per-call override for [`ModeFlags::raises`].
    pub raises: Option<bool>,

    /// Per-call override for [`ModeFlags::unknown_defaults`].
    pub unknown_defaults: Option<bool>,

    /// Per-call override for [`ModeFlags::excluded_defaults`].
    pub excluded_defaults: Option<bool>,

    /// Per-call override for [`ModeFlags::aliased_patterns`].
    pub aliased_patterns: Option<bool>,
}

impl InterpolationOptions {
    /// Options with no values and no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the flags for one call: every override set here wins over the
    /// supplied defaults.
    pub fn effective_flags(&self, defaults: ModeFlags) -> ModeFlags {
        ModeFlags {
            raises: self.raises.unwrap_or(defaults.raises),
            unknown_defaults: self.unknown_defaults.unwrap_or(defaults.unknown_defaults),
            excluded_defaults: self.excluded_defaults.unwrap_or(defaults.excluded_defaults),
            aliased_patterns: self.aliased_patterns.unwrap_or(defaults.aliased_patterns),
        }
    }
}
