//! Error types for anchors and Bates numbering

use thiserror::Error;

/// Errors raised when rendering or parsing a source anchor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    #[error("Source anchor has no locating field (bates, page, exhibit or document)")]
    Unlocatable,

    #[error("Invalid value for '{key}' in anchor query: {value}")]
    InvalidQueryValue { key: String, value: String },

    #[error("Malformed anchor query segment: {0}")]
    MalformedSegment(String),
}

/// Errors raised when parsing Bates numbers or building ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BatesError {
    #[error("No numeric component in Bates string: {0}")]
    NoNumber(String),

    #[error("Bates number out of range: {0}")]
    Overflow(String),

    #[error("Bates range start {start} is after end {end}")]
    Reversed { start: String, end: String },

    #[error("Bates range endpoints use different prefixes: '{0}' vs '{1}'")]
    PrefixMismatch(String, String),
}
