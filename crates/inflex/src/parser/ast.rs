//! Public AST types for scanned translation strings.
//!
//! These types are public to enable external tooling (linters, extraction
//! scripts, etc.) to inspect which patterns a translation string contains.

/// A scanned translation string: literal runs, escaped patterns, and
/// inflection patterns in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

/// A segment within a scanned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied through untouched.
    Literal(String),
    /// An escaped pattern (`@@{...}` or `\@{...}`), emitted verbatim with
    /// the escape marker already stripped.
    Escaped(String),
    /// An inflection pattern to resolve against the locale database.
    Pattern(Pattern),
}

/// One `@{...}` or `@kind{...}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Kind name for named patterns. Unnamed patterns infer their kind from
    /// the first token that resolves.
    pub kind: Option<String>,
    /// `|`-separated groups in declaration order.
    pub groups: Vec<Group>,
    /// Verbatim pattern text, kept for error reporting.
    pub raw: String,
}

/// A `tokenlist:replacement` entry within a pattern, or a bare free-text
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Matchers before the first `:`. Empty for a free-text fallback group.
    pub tokens: Vec<TokenMatcher>,
    /// Replacement text after the first `:` (it may itself contain `:`).
    pub text: String,
}

impl Group {
    /// A group with no token list at all is the free-text fallback.
    pub fn is_free_text(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A single token reference within a group's token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMatcher {
    /// `!`-prefixed matchers match when the option is *not* this token.
    pub negated: bool,
    pub name: String,
}
