//! Jurisdiction rule sets shipped with the engine
//!
//! Each state module exposes a `rules()` constructor returning plain data.
//! More jurisdictions can be registered at runtime from TOML without touching
//! this module; see [`crate::jurisdiction::RulesRegistry::extend_from_toml`].

pub mod california;

use crate::jurisdiction::JurisdictionRules;

/// Rule sets compiled into the crate
pub fn builtin_rules() -> Vec<JurisdictionRules> {
    vec![california::rules()]
}

/// Statutes a jurisdiction's templated sections cite, formatted
pub fn covered_statutes(rules: &JurisdictionRules) -> Vec<String> {
    let mut statutes: Vec<String> = Vec::new();
    for entry in rules.templates.entries() {
        for cite in entry.authorities.iter().filter(|c| c.is_statute()) {
            let formatted = cite.formatted();
            if !statutes.contains(&formatted) {
                statutes.push(formatted);
            }
        }
    }
    statutes
}
