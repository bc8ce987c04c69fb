//! Pattern resolution engine.
//!
//! Walks a scanned template and replaces each inflection pattern with the
//! text selected by the caller's option values, the locale database, and the
//! mode flags. Literal and escaped segments are copied through.
//!
//! Each pattern is resolved in phases: token resolution (aliases, kind
//! binding), option resolution for the bound kind, group matching in
//! declaration order, then the fallback rules (free text, default-group
//! substitution, empty string).

use std::collections::HashMap;

use crate::database::{LocaleDatabase, TokenStore};
use crate::interpreter::error::{InflectionError, compute_suggestions};
use crate::parser::ast::{Pattern, Segment, Template};
use crate::parser::{ESCAPE, LOUD_MARKER};
use crate::types::ModeFlags;

/// Interpolate every pattern of a scanned template against a locale
/// database.
///
/// # Errors
///
/// Returns an error only when `flags.raises` is enabled and a pattern hits
/// an invalid-token, misplaced-token, or missing-option condition. With
/// `raises` disabled the offending step degrades to "not found" and the
/// pattern falls through to its fallback rules.
pub fn interpolate_template(
    template: &Template,
    db: &LocaleDatabase,
    values: &HashMap<String, String>,
    flags: ModeFlags,
) -> Result<String, InflectionError> {
    let empty = TokenStore::new();
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) | Segment::Escaped(text) => output.push_str(text),
            Segment::Pattern(pattern) => {
                output.push_str(&resolve_pattern(pattern, db, values, flags, &empty)?);
            }
        }
    }
    Ok(output)
}

/// One group after token resolution: the matchers that survived, plus the
/// replacement text.
struct ResolvedGroup<'a> {
    tokens: Vec<ResolvedToken>,
    text: &'a str,
}

struct ResolvedToken {
    name: String,
    negated: bool,
}

/// Resolve a single pattern occurrence to its substitution text.
fn resolve_pattern(
    pattern: &Pattern,
    db: &LocaleDatabase,
    values: &HashMap<String, String>,
    flags: ModeFlags,
    empty: &TokenStore,
) -> Result<String, InflectionError> {
    let named = pattern.kind.as_deref();
    // Named patterns read the kind-scoped strict store; unnamed patterns the
    // flat loose store. A named kind with no strict data resolves nothing.
    let store: &TokenStore = match named {
        Some(kind) => db.strict().store(kind).unwrap_or(empty),
        None => db.loose(),
    };

    let mut bound_kind: Option<String> = named.map(ToString::to_string);
    let mut groups: Vec<ResolvedGroup<'_>> = Vec::with_capacity(pattern.groups.len());
    let mut free_text: Option<&str> = None;

    for group in &pattern.groups {
        if group.is_free_text() {
            free_text = Some(&group.text);
            continue;
        }
        let mut tokens = Vec::with_capacity(group.tokens.len());
        for matcher in &group.tokens {
            if let Some(name) =
                resolve_token(&matcher.name, store, named, &mut bound_kind, flags, pattern)?
            {
                tokens.push(ResolvedToken {
                    name,
                    negated: matcher.negated,
                });
            }
        }
        groups.push(ResolvedGroup {
            tokens,
            text: &group.text,
        });
    }

    // The default token participates both as the unknown_defaults fallback
    // option and in the excluded_defaults group substitution.
    let default_token: Option<String> = bound_kind.as_deref().and_then(|kind| {
        store
            .default_token(kind)
            .and_then(|d| store.true_token(d, Some(kind)))
            .map(ToString::to_string)
    });

    let (effective, requested_valid) = resolve_option(
        store,
        values,
        named.is_some(),
        bound_kind.as_deref(),
        default_token.as_deref(),
        flags,
        pattern,
    )?;

    // Group matching in declaration order; first match wins.
    let mut matched: Option<&str> = None;
    let mut default_group_text: Option<&str> = None;
    for group in &groups {
        if let (Some(default), None) = (default_token.as_deref(), default_group_text)
            && group.tokens.iter().any(|t| t.name == default)
        {
            default_group_text = Some(group.text);
        }
        if group_matches(group, effective.as_deref()) {
            matched = Some(group.text);
            break;
        }
    }

    let rendered = if let Some(text) = matched {
        render_replacement(text, effective.as_deref(), store)
    } else if flags.excluded_defaults
        && requested_valid
        && let (Some(default), Some(text)) = (default_token.as_deref(), default_group_text)
    {
        // A recognized but unlisted option acts as if the default had been
        // chosen: reuse the default token's group text.
        render_replacement(text, Some(default), store)
    } else {
        free_text.unwrap_or_default().to_string()
    };
    Ok(rendered)
}

/// Resolve one pattern token name: apply alias resolution when enabled,
/// determine the token's kind, and bind or check the pattern's kind.
///
/// Returns `Ok(None)` when the token cannot participate in matching and
/// `raises` is disabled.
fn resolve_token(
    name: &str,
    store: &TokenStore,
    named: Option<&str>,
    bound_kind: &mut Option<String>,
    flags: ModeFlags,
    pattern: &Pattern,
) -> Result<Option<String>, InflectionError> {
    if name.is_empty() {
        return invalid_token(name, store, flags, pattern);
    }
    let name: String = if flags.aliased_patterns {
        match store.true_token(name, named) {
            Some(resolved) => resolved.to_string(),
            None => return invalid_token(name, store, flags, pattern),
        }
    } else {
        name.to_string()
    };
    let Some(kind) = store.kind_of(&name) else {
        return invalid_token(&name, store, flags, pattern);
    };
    match bound_kind.as_deref() {
        None => *bound_kind = Some(kind.to_string()),
        Some(bound) if bound != kind => {
            if flags.raises {
                return Err(InflectionError::MisplacedToken {
                    pattern: pattern.raw.clone(),
                    token: name,
                    kind: kind.to_string(),
                });
            }
            return Ok(None);
        }
        Some(_) => {}
    }
    Ok(Some(name))
}

fn invalid_token(
    name: &str,
    store: &TokenStore,
    flags: ModeFlags,
    pattern: &Pattern,
) -> Result<Option<String>, InflectionError> {
    if flags.raises {
        let known = store.token_names();
        Err(InflectionError::InvalidToken {
            pattern: pattern.raw.clone(),
            token: name.to_string(),
            suggestions: compute_suggestions(name, &known),
        })
    } else {
        Ok(None)
    }
}

/// Determine the effective option token for the bound kind.
///
/// Returns the effective option (already resolved to a true token) and
/// whether the original request named a known token of the kind.
fn resolve_option(
    store: &TokenStore,
    values: &HashMap<String, String>,
    named: bool,
    kind: Option<&str>,
    default_token: Option<&str>,
    flags: ModeFlags,
    pattern: &Pattern,
) -> Result<(Option<String>, bool), InflectionError> {
    let Some(kind) = kind else {
        // No token resolved in an unnamed pattern: nothing to look up.
        return Ok((None, false));
    };
    let fallback = || {
        if flags.unknown_defaults {
            default_token.map(ToString::to_string)
        } else {
            None
        }
    };

    match requested_value(values, kind, named) {
        Some(value) => match store.true_token(value, Some(kind)) {
            Some(token) => Ok((Some(token.to_string()), true)),
            None => match fallback() {
                Some(default) => Ok((Some(default), false)),
                None if flags.raises => Err(InflectionError::OptionIncorrect {
                    pattern: pattern.raw.clone(),
                    kind: kind.to_string(),
                    option: value.to_string(),
                }),
                None => Ok((None, false)),
            },
        },
        None => match fallback() {
            Some(default) => Ok((Some(default), false)),
            None if flags.raises => Err(InflectionError::OptionNotFound {
                pattern: pattern.raw.clone(),
                kind: kind.to_string(),
            }),
            None => Ok((None, false)),
        },
    }
}

/// Requested option value for a kind. Named patterns prefer the strict
/// `@kind` key, unnamed patterns the plain key; either falls back to the
/// other. Empty values count as absent.
fn requested_value<'a>(
    values: &'a HashMap<String, String>,
    kind: &str,
    named: bool,
) -> Option<&'a str> {
    let strict_key = format!("@{kind}");
    let (first, second) = if named {
        (strict_key.as_str(), kind)
    } else {
        (kind, strict_key.as_str())
    };
    values
        .get(first)
        .filter(|v| !v.is_empty())
        .or_else(|| values.get(second).filter(|v| !v.is_empty()))
        .map(String::as_str)
}

/// A group matches when it has no negated tokens and the option is among its
/// plain tokens, or when it has exactly one negated token and the option is
/// not that token. Two or more negated tokens never match.
fn group_matches(group: &ResolvedGroup<'_>, option: Option<&str>) -> bool {
    let mut negated = group.tokens.iter().filter(|t| t.negated);
    match (negated.next(), negated.next()) {
        (None, _) => option.is_some_and(|o| group.tokens.iter().any(|t| t.name == o)),
        (Some(neg), None) => option != Some(neg.name.as_str()),
        (Some(_), Some(_)) => false,
    }
}

/// Produce the final text for a chosen replacement: the loud marker emits
/// the token's description, a leading escape strips one level, anything else
/// passes through untouched (including `%{...}` host markers).
fn render_replacement(text: &str, token: Option<&str>, store: &TokenStore) -> String {
    if text == LOUD_MARKER {
        return token
            .and_then(|t| store.description(t))
            .unwrap_or_default()
            .to_string();
    }
    match text.strip_prefix(ESCAPE) {
        Some(rest) => rest.to_string(),
        None => text.to_string(),
    }
}
