//! Citation trail primitives for demand documents
//!
//! This crate provides the pieces that tie assertions in a demand back to
//! their legal and evidentiary basis:
//! - Case-law and statute citations with fixed legal formatting
//! - A per-run citation registry that deduplicates and builds a Table of Authorities
//! - Source anchors (Bates/exhibit/page/line) rendered as inline chips and deep-link queries
//! - Bates number normalization and ranges
//!
//! Nothing here holds process-wide state. A [`CitationRegistry`] belongs to a
//! single assembly run and is dropped with it.

pub mod anchor;
pub mod bates;
pub mod citation;
pub mod errors;
pub mod registry;

pub use anchor::SourceAnchor;
pub use bates::{normalize_bates, BatesNumber, BatesRange};
pub use citation::{CaseCitation, Citation, StatuteCitation};
pub use errors::{AnchorError, BatesError};
pub use registry::CitationRegistry;

/// En-dash used between range endpoints in human-readable output
pub const EN_DASH: char = '\u{2013}';
