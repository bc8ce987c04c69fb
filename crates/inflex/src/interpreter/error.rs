//! Error types for pattern interpolation.

use thiserror::Error;

/// An error raised while resolving a single pattern occurrence.
///
/// Produced only when the `raises` flag is enabled; otherwise the offending
/// pattern step is skipped and the pattern falls through to its free-text
/// and default-token fallback rules. Errors are local to one pattern: when
/// not raising, interpolation continues with the next occurrence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InflectionError {
    /// A pattern token is empty or names no known token of the expected
    /// kind.
    #[error(
        "invalid inflection token '{token}' in pattern '{pattern}'{}",
        format_suggestions(suggestions)
    )]
    InvalidToken {
        pattern: String,
        token: String,
        suggestions: Vec<String>,
    },

    /// An unnamed pattern mixes tokens of more than one kind.
    #[error("inflection token '{token}' of kind '{kind}' is misplaced in pattern '{pattern}'")]
    MisplacedToken {
        pattern: String,
        token: String,
        kind: String,
    },

    /// No usable option value for the pattern's kind: nothing was requested
    /// and no default token could be resolved.
    #[error("no inflection option for kind '{kind}' in pattern '{pattern}'")]
    OptionNotFound { pattern: String, kind: String },

    /// An option value was supplied but names no known token of the
    /// expected kind.
    #[error(
        "inflection option '{option}' for kind '{kind}' does not name a known token in pattern '{pattern}'"
    )]
    OptionIncorrect {
        pattern: String,
        kind: String,
        option: String,
    },
}

/// Compute did-you-mean suggestions for an unknown token name.
///
/// Returns up to three known names within Levenshtein distance 1 (for names
/// of three characters or fewer) or 2, closest first.
pub fn compute_suggestions(input: &str, available: &[String]) -> Vec<String> {
    let max_distance = if input.len() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|name| (strsim::levenshtein(input, name), name))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.clone())
        .collect()
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}
