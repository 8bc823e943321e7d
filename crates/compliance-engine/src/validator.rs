//! Compliance validation of filled demand sections
//!
//! Pure evaluation over (rules, filled-section map). Structural omissions go
//! to `missing`; everything else is an advisory warning. Unknown
//! jurisdictions pass with a single warning and never block.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::jurisdiction::{HeuristicCheck, JurisdictionRules, RulesRegistry, SectionHeuristic};
use crate::patterns;

/// Outcome of one validation call. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    /// Required section-keys absent or empty, in the rule set's declaration order
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validator bound to an explicitly constructed rules registry
#[derive(Debug, Clone, Copy)]
pub struct ComplianceValidator<'a> {
    registry: &'a RulesRegistry,
}

impl<'a> ComplianceValidator<'a> {
    pub fn new(registry: &'a RulesRegistry) -> Self {
        Self { registry }
    }

    pub fn validate(&self, jurisdiction: &str, filled: &HashMap<String, String>) -> ValidationResult {
        match self.registry.get(jurisdiction) {
            Some(rules) => validate_against(rules, filled),
            None => {
                tracing::debug!(jurisdiction, "No rules registered; passing through");
                ValidationResult {
                    ok: true,
                    missing: Vec::new(),
                    warnings: vec![format!(
                        "no validation rules defined for {}",
                        jurisdiction.trim()
                    )],
                }
            }
        }
    }
}

fn filled_content<'m>(filled: &'m HashMap<String, String>, key: &str) -> Option<&'m str> {
    filled
        .get(key)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
}

/// Evaluate a filled-section map against one jurisdiction's rules
pub fn validate_against(rules: &JurisdictionRules, filled: &HashMap<String, String>) -> ValidationResult {
    let mut missing = Vec::new();
    let mut warnings = Vec::new();

    for key in rules.required.keys() {
        match filled_content(filled, key) {
            None => missing.push(key.clone()),
            Some(content) if patterns::has_unfilled_placeholder(content) => {
                let placeholders = patterns::unfilled_placeholders(content);
                warnings.push(format!(
                    "Section '{}' has unfilled placeholders and needs completion: {}",
                    key,
                    placeholders.join(", ")
                ));
            }
            Some(_) => {}
        }
    }

    for heuristic in &rules.heuristics {
        if let Some(content) = filled_content(filled, &heuristic.key) {
            if let Some(warning) = run_heuristic(heuristic, content) {
                warnings.push(warning);
            }
        }
    }

    for advisory in &rules.advisories {
        if filled_content(filled, &advisory.key).is_none() {
            warnings.push(format!(
                "Recommended section '{}' is absent: {}",
                advisory.key, advisory.reason
            ));
        }
    }

    ValidationResult {
        ok: missing.is_empty(),
        missing,
        warnings,
    }
}

fn run_heuristic(heuristic: &SectionHeuristic, content: &str) -> Option<String> {
    match &heuristic.check {
        HeuristicCheck::MonetaryFigure => {
            if patterns::has_monetary_figure(content) {
                None
            } else {
                Some(format!(
                    "Section '{}' does not state a dollar figure",
                    heuristic.key
                ))
            }
        }
        HeuristicCheck::AnyKeyword { words } => {
            if patterns::contains_any_keyword(content, words) {
                None
            } else {
                Some(format!(
                    "Section '{}' should mention one of: {}",
                    heuristic.key,
                    words.join(", ")
                ))
            }
        }
    }
}
