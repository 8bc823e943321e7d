//! Per-run accumulation: citations, anchor trail, run warnings
//!
//! Owned by one `assemble` call and threaded through the strategy by `&mut`,
//! so concurrent runs never share citations or anchors.

use citation_core::{Citation, CitationRegistry, SourceAnchor};
use tracing::warn;

#[derive(Debug, Default)]
pub struct RunContext {
    pub citations: CitationRegistry,
    pub anchors: Vec<SourceAnchor>,
    pub warnings: Vec<String>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cite<I: IntoIterator<Item = Citation>>(&mut self, citations: I) {
        self.citations.extend(citations);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Render an anchor's chip and add it to the trail.
    ///
    /// Unlocatable anchors are rejected: no chip, nothing added to the trail,
    /// and a run warning naming `context`.
    pub fn record_anchor(&mut self, anchor: &SourceAnchor, context: &str) -> Option<String> {
        match anchor.render_chip() {
            Ok(chip) => {
                if !self.anchors.contains(anchor) {
                    self.anchors.push(anchor.clone());
                }
                Some(chip)
            }
            Err(e) => {
                warn!(context, error = %e, "Rejected source anchor");
                self.warnings
                    .push(format!("Rejected source anchor for {}: {}", context, e));
                None
            }
        }
    }
}
