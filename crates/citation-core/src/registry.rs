//! Per-run citation registry and Table of Authorities

use std::collections::HashSet;

use crate::citation::Citation;

/// Insertion-ordered, deduplicated set of citations for one assembly run.
///
/// Two citations are duplicates iff their formatted strings are identical, so
/// the same case cited with two different pin cites is kept twice.
#[derive(Debug, Clone, Default)]
pub struct CitationRegistry {
    entries: Vec<Citation>,
    seen: HashSet<String>,
}

impl CitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a citation. Returns false when it was already present.
    pub fn register(&mut self, citation: Citation) -> bool {
        if !self.seen.insert(citation.formatted()) {
            return false;
        }
        self.entries.push(citation);
        true
    }

    pub fn extend<I: IntoIterator<Item = Citation>>(&mut self, citations: I) {
        for citation in citations {
            self.register(citation);
        }
    }

    /// All citations in first-registration order
    pub fn all(&self) -> &[Citation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cases(&self) -> impl Iterator<Item = &Citation> {
        self.entries.iter().filter(|c| c.is_case())
    }

    pub fn statutes(&self) -> impl Iterator<Item = &Citation> {
        self.entries.iter().filter(|c| c.is_statute())
    }

    pub fn into_vec(self) -> Vec<Citation> {
        self.entries
    }

    /// Cases first, then statutes; insertion order within each group.
    /// Empty groups are left out, and an empty registry renders as "".
    pub fn to_table_of_authorities(&self) -> String {
        let mut blocks = Vec::new();

        let cases: Vec<String> = self.cases().map(Citation::formatted).collect();
        if !cases.is_empty() {
            blocks.push(format!("CASES\n\n{}", cases.join("\n")));
        }

        let statutes: Vec<String> = self.statutes().map(Citation::formatted).collect();
        if !statutes.is_empty() {
            blocks.push(format!("STATUTES\n\n{}", statutes.join("\n")));
        }

        blocks.join("\n\n")
    }
}
