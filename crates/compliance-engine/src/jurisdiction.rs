//! Jurisdiction rule data for demand compliance
//!
//! Each jurisdiction ships three pieces of data:
//! - `RequiredElementSet`: section-keys that must be present, non-empty and fully filled
//! - `JurisdictionTemplateSet`: the templated sections, in emission order
//! - advisories: sections strongly recommended but never required
//!
//! Adding a jurisdiction is data registration on a [`RulesRegistry`]; the
//! validator and assembler never branch on a jurisdiction code.

use citation_core::Citation;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::errors::RulesError;

/// Ordered set of section-keys a compliant document must contain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RequiredElementSet {
    keys: Vec<String>,
}

impl RequiredElementSet {
    /// Declaration order is kept; repeated keys are dropped
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let keys = keys
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| seen.insert(k.clone()))
            .collect();
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<Vec<String>> for RequiredElementSet {
    fn from(keys: Vec<String>) -> Self {
        Self::new(keys)
    }
}

impl From<RequiredElementSet> for Vec<String> {
    fn from(set: RequiredElementSet) -> Self {
        set.keys
    }
}

/// One templated section of a jurisdiction's demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub key: String,
    pub title: String,
    /// Template text with `{{token}}` placeholders
    pub body: String,
    pub order: u32,
    /// Authorities cited by this section, registered when it is filled
    #[serde(default)]
    pub authorities: Vec<Citation>,
}

impl TemplateEntry {
    pub fn new(key: &str, title: &str, order: u32, body: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            order,
            authorities: Vec::new(),
        }
    }

    pub fn citing(mut self, citation: Citation) -> Self {
        self.authorities.push(citation);
        self
    }
}

/// Templated sections for one jurisdiction, kept in emission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TemplateEntry>", into = "Vec<TemplateEntry>")]
pub struct JurisdictionTemplateSet {
    entries: Vec<TemplateEntry>,
}

impl JurisdictionTemplateSet {
    pub fn new(mut entries: Vec<TemplateEntry>) -> Self {
        entries.sort_by_key(|e| e.order);
        Self { entries }
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&TemplateEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TemplateEntry>> for JurisdictionTemplateSet {
    fn from(entries: Vec<TemplateEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<JurisdictionTemplateSet> for Vec<TemplateEntry> {
    fn from(set: JurisdictionTemplateSet) -> Self {
        set.entries
    }
}

/// Section recommended for every demand in the jurisdiction; absence is a warning only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorySection {
    pub key: String,
    pub reason: String,
}

/// Section-specific quality check. Failures are warnings, never missing elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeuristic {
    pub key: String,
    pub check: HeuristicCheck,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeuristicCheck {
    /// Content must state a `$`-prefixed figure
    MonetaryFigure,
    /// Content must contain at least one of the words (case-insensitive)
    AnyKeyword { words: Vec<String> },
}

impl SectionHeuristic {
    pub fn monetary(key: &str) -> Self {
        Self {
            key: key.to_string(),
            check: HeuristicCheck::MonetaryFigure,
        }
    }

    pub fn keywords(key: &str, words: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            check: HeuristicCheck::AnyKeyword {
                words: words.iter().map(|w| w.to_string()).collect(),
            },
        }
    }
}

/// Complete rule set for one jurisdiction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JurisdictionRules {
    /// Two-letter state/region code
    pub code: String,
    pub name: String,
    pub required: RequiredElementSet,
    pub templates: JurisdictionTemplateSet,
    #[serde(default)]
    pub advisories: Vec<AdvisorySection>,
    #[serde(default)]
    pub heuristics: Vec<SectionHeuristic>,
    /// Shortest acceptance window the jurisdiction allows for a time-limited demand
    #[serde(default)]
    pub min_response_days: Option<u32>,
}

impl JurisdictionRules {
    fn check(&self) -> Result<(), RulesError> {
        if self.code.trim().is_empty() {
            return Err(RulesError::Invalid {
                code: self.name.clone(),
                reason: "jurisdiction code is empty".to_string(),
            });
        }
        if self.required.is_empty() {
            return Err(RulesError::Invalid {
                code: self.code.clone(),
                reason: "no required elements declared".to_string(),
            });
        }
        let mut seen = HashSet::new();
        for entry in self.templates.entries() {
            if !seen.insert(entry.key.as_str()) {
                return Err(RulesError::Invalid {
                    code: self.code.clone(),
                    reason: format!("template key '{}' declared twice", entry.key),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    #[serde(default)]
    jurisdiction: Vec<JurisdictionRules>,
}

/// Lookup of jurisdiction code -> rules. Explicitly constructed and passed
/// around; tests build their own instead of touching shared state.
#[derive(Debug, Clone, Default)]
pub struct RulesRegistry {
    rules: HashMap<String, JurisdictionRules>,
}

impl RulesRegistry {
    /// Empty registry: every jurisdiction is treated as unknown
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the jurisdictions shipped in this crate
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for rules in crate::states::builtin_rules() {
            registry.register(rules);
        }
        registry
    }

    /// Add or replace a jurisdiction. Codes are matched case-insensitively.
    pub fn register(&mut self, rules: JurisdictionRules) {
        let code = normalize_code(&rules.code);
        tracing::debug!(jurisdiction = %code, "Registered jurisdiction rules");
        self.rules.insert(code, rules);
    }

    pub fn get(&self, code: &str) -> Option<&JurisdictionRules> {
        self.rules.get(&normalize_code(code))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Registered codes, sorted
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rules.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Register every `[[jurisdiction]]` table in a TOML document.
    /// Returns how many jurisdictions were added.
    pub fn extend_from_toml(&mut self, source: &str) -> Result<usize, RulesError> {
        let file: RulesFile = toml::from_str(source)?;
        for rules in &file.jurisdiction {
            rules.check()?;
        }
        let count = file.jurisdiction.len();
        for rules in file.jurisdiction {
            self.register(rules);
        }
        Ok(count)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
