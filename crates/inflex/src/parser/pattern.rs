//! Pattern scanner built on winnow.
//!
//! Scans arbitrary translation text into a segment list. Handles:
//! - Literal text (anything that does not form a pattern)
//! - Inflection patterns: `@{...}` and `@kind{...}`
//! - Escaped patterns: `@@{...}` and `\@{...}` emit the pattern verbatim
//!
//! Scanning is total: text that does not form a complete pattern stays
//! literal via backtracking, so there is no failure path on the
//! interpolation route.

use super::ast::{Group, Pattern, Segment, Template, TokenMatcher};
use winnow::combinator::{alt, delimited, preceded};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_till, take_while};

/// Negation marker prefixing token names inside token lists.
pub const NEGATION_MARKER: char = '!';
/// Replacement text equal to this marker substitutes the token description.
pub const LOUD_MARKER: &str = "~";
/// Escape character for patterns and replacement text.
pub const ESCAPE: char = '\\';

/// Scan a translation string into a template.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    let mut segments = Vec::new();
    while !remaining.is_empty() {
        match segment(&mut remaining) {
            Ok(s) => segments.push(s),
            Err(_) => break, // unreachable: `literal_char` accepts any character
        }
    }
    Template {
        segments: merge_literals(segments),
    }
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single segment (escaped pattern, pattern, or literal).
fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escaped_pattern, pattern, literal_char)).parse_next(input)
}

/// Parse `@@{...}` or `\@{...}`: the pattern is emitted verbatim with the
/// escape marker stripped.
fn escaped_pattern(input: &mut &str) -> ModalResult<Segment> {
    preceded(one_of(['@', ESCAPE]), pattern_parts)
        .map(|(kind, body)| Segment::Escaped(raw_pattern(kind, body)))
        .parse_next(input)
}

/// Parse an inflection pattern: `@{...}` or `@kind{...}`.
fn pattern(input: &mut &str) -> ModalResult<Segment> {
    pattern_parts
        .map(|(kind, body)| Segment::Pattern(build_pattern(kind, body)))
        .parse_next(input)
}

/// Parse `@`, an optional kind name, and a braced non-empty body.
fn pattern_parts<'i>(input: &mut &'i str) -> ModalResult<(&'i str, &'i str)> {
    preceded(
        '@',
        (
            take_while(0.., is_kind_char),
            delimited('{', take_till(1.., ['}']), '}'),
        ),
    )
    .parse_next(input)
}

/// Any single character outside a pattern is literal output.
fn literal_char(input: &mut &str) -> ModalResult<Segment> {
    any.map(|c: char| Segment::Literal(c.to_string()))
        .parse_next(input)
}

/// Check if a character can appear in a kind name.
fn is_kind_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Rebuild the verbatim pattern text from its parts.
fn raw_pattern(kind: &str, body: &str) -> String {
    format!("@{kind}{{{body}}}")
}

/// Split a pattern body into groups and token lists.
fn build_pattern(kind: &str, body: &str) -> Pattern {
    let groups = body.split('|').map(parse_group).collect();
    Pattern {
        kind: (!kind.is_empty()).then(|| kind.to_string()),
        groups,
        raw: raw_pattern(kind, body),
    }
}

/// Split one group at the first `:` into token list and replacement text.
/// A group without `:` is a free-text fallback.
fn parse_group(group: &str) -> Group {
    match group.split_once(':') {
        Some((list, text)) => Group {
            tokens: parse_token_list(list),
            text: text.to_string(),
        },
        None => Group {
            tokens: Vec::new(),
            text: group.to_string(),
        },
    }
}

/// Parse a comma-separated token list with optional negation markers.
fn parse_token_list(list: &str) -> Vec<TokenMatcher> {
    list.split(',')
        .map(|raw| {
            let raw = raw.trim();
            match raw.strip_prefix(NEGATION_MARKER) {
                Some(name) => TokenMatcher {
                    negated: true,
                    name: name.trim().to_string(),
                },
                None => TokenMatcher {
                    negated: false,
                    name: raw.to_string(),
                },
            }
        })
        .collect()
}
