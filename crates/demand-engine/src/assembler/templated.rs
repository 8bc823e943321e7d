//! Templated jurisdiction path: fill every template, then validate

use async_trait::async_trait;
use compliance_engine::{validate_against, JurisdictionRules};
use shared_types::{CaseData, Section};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::banner::compliance_banner;
use super::run::RunContext;
use super::strategy::{Composition, CompositionStrategy, StrategyKind};
use super::values::token_values;
use super::acceptance_terms;
use crate::config::EngineConfig;
use crate::damages::DamagesBreakdown;
use crate::templates::{fill_tracked, tidy};

pub struct TemplatedJurisdictionStrategy<'a> {
    rules: &'a JurisdictionRules,
    config: &'a EngineConfig,
}

impl<'a> TemplatedJurisdictionStrategy<'a> {
    pub fn new(rules: &'a JurisdictionRules, config: &'a EngineConfig) -> Self {
        Self { rules, config }
    }

    fn check_response_period(&self, response_days: u32, run: &mut RunContext) {
        if let Some(minimum) = self.rules.min_response_days {
            if response_days < minimum {
                run.warn(format!(
                    "Response period of {} days is shorter than the {}-day minimum for {}",
                    response_days, minimum, self.rules.name
                ));
            }
        }
    }
}

#[async_trait]
impl<'a> CompositionStrategy for TemplatedJurisdictionStrategy<'a> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::TemplatedJurisdiction
    }

    async fn compose(&self, case: &CaseData, run: &mut RunContext) -> Composition {
        let damages = DamagesBreakdown::compute(case, &self.config.damages);
        let terms = acceptance_terms(case, &self.config.document, run);
        self.check_response_period(terms.response_days, run);
        let values = token_values(case, &damages, &terms, run);

        let mut filled: HashMap<String, String> = HashMap::new();
        let mut sections = Vec::with_capacity(self.rules.templates.len() + 1);

        for entry in self.rules.templates.entries() {
            let result = fill_tracked(&entry.body, &values);
            if !result.is_complete() {
                debug!(section = %entry.key, unfilled = ?result.unfilled, "Template left unfilled tokens");
            }
            let content = tidy(&result.text);

            run.cite(entry.authorities.iter().cloned());
            filled.insert(entry.key.clone(), content.clone());
            sections.push(Section::new(
                entry.key.as_str(),
                entry.title.as_str(),
                content,
                entry.order,
                self.rules.required.contains(&entry.key),
            ));
        }

        let validation = validate_against(self.rules, &filled);
        if !validation.ok {
            warn!(
                jurisdiction = %self.rules.code,
                missing = ?validation.missing,
                "Templated demand is incomplete; inserting compliance banner"
            );
            sections.insert(0, compliance_banner(&validation, &self.rules.name));
        }

        Composition {
            sections,
            validation: Some(validation),
        }
    }
}
