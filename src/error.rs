//! Error type shared by the normalization routines.
//!
//! The `try_*` matchers return these. Their never-failing wrappers log them
//! and hand back an empty result instead.

use once_cell::sync::Lazy;
use regex::Regex;

/// Custom error type for normalization internals
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Time component out of range: {0}")]
    OutOfRange(String),
    #[error("Invalid time slot record: {0}")]
    InvalidRecord(String),
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

/// A regex compiled on first use. Compilation errors are kept and reported
/// on every access instead of panicking.
pub type LazyPattern = Lazy<std::result::Result<Regex, regex::Error>>;

/// Borrow the compiled regex behind a [`LazyPattern`]
pub fn compiled(pattern: &'static LazyPattern) -> Result<&'static Regex> {
    pattern.as_ref().map_err(|e| NormalizeError::Pattern(e.clone()))
}
