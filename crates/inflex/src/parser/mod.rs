//! Scanner for inflection patterns embedded in translation strings.
//!
//! The scanner turns arbitrary text into a [`Template`] of literal runs,
//! escaped patterns, and inflection patterns for the interpreter to resolve.

pub mod ast;
mod pattern;

pub use ast::{Group, Pattern, Segment, Template, TokenMatcher};
pub use pattern::{ESCAPE, LOUD_MARKER, NEGATION_MARKER, parse_template};
