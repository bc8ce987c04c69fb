//! Pattern interpolation engine.
//!
//! This module provides the evaluation engine that takes scanned templates
//! and produces substituted strings, plus the user-facing [`Inflector`]
//! registry that owns per-locale databases and default mode flags.

mod error;
mod evaluator;
mod inflector;

pub use error::{InflectionError, compute_suggestions};
pub use evaluator::interpolate_template;
pub use inflector::Inflector;
