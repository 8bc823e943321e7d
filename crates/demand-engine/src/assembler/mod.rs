//! Document assembly
//!
//! One linear pass per call: pick a strategy, compose sections, append the
//! Table of Authorities, sort by order, concatenate. All per-run state lives
//! in a [`RunContext`] created inside [`DemandAssembler::assemble`].

pub mod banner;
pub mod generic;
pub mod run;
pub mod strategy;
pub mod templated;
pub mod values;

pub use generic::GenericNarrativeStrategy;
pub use run::RunContext;
pub use strategy::{Composition, CompositionStrategy, StrategyKind};
pub use templated::TemplatedJurisdictionStrategy;

use citation_core::{Citation, SourceAnchor};
use compliance_engine::patterns::has_unfilled_placeholder;
use compliance_engine::{BusinessCalendar, ComplianceValidator, RulesRegistry, ValidationResult};
use serde::{Deserialize, Serialize};
use shared_types::{CaseData, Section};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::{DocumentConfig, EngineConfig};
use crate::damages::FeeSchedule;
use crate::drafting::DraftingService;
use values::AcceptanceTerms;

pub const TABLE_OF_AUTHORITIES_KEY: &str = "table_of_authorities";

/// Final output of one assembly run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledDocument {
    pub strategy: StrategyKind,
    pub jurisdiction: String,
    /// Sections in final order
    pub sections: Vec<Section>,
    /// `# {title}\n\n{content}` per section, joined by the configured separator
    pub text: String,
    pub citations: Vec<Citation>,
    pub anchors: Vec<SourceAnchor>,
    /// Present only for the templated jurisdiction path
    pub validation: Option<ValidationResult>,
    pub warnings: Vec<String>,
}

impl AssembledDocument {
    /// True only when a jurisdiction's rules were checked and passed and no
    /// required section still carries an unfilled placeholder
    pub fn ready_to_serve(&self) -> bool {
        let validated = matches!(&self.validation, Some(v) if v.ok);
        validated
            && self
                .sections
                .iter()
                .filter(|s| s.required())
                .all(|s| !has_unfilled_placeholder(s.content()))
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.key() == key)
    }

    /// Viewer deep links for the anchor trail, in recording order
    pub fn anchor_links(&self) -> Vec<String> {
        self.anchors.iter().map(SourceAnchor::to_query).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Assembles demands from explicitly constructed, immutable lookups.
///
/// Holds no per-run state; one instance may serve concurrent calls.
#[derive(Debug, Clone)]
pub struct DemandAssembler {
    rules: RulesRegistry,
    fee_schedule: FeeSchedule,
    config: EngineConfig,
}

impl DemandAssembler {
    pub fn new(rules: RulesRegistry, fee_schedule: FeeSchedule, config: EngineConfig) -> Self {
        Self {
            rules,
            fee_schedule,
            config,
        }
    }

    pub fn rules(&self) -> &RulesRegistry {
        &self.rules
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }

    /// Validate an already-filled section map against the registry
    pub fn validate(&self, jurisdiction: &str, filled: &HashMap<String, String>) -> ValidationResult {
        ComplianceValidator::new(&self.rules).validate(jurisdiction, filled)
    }

    /// Templated path when the jurisdiction has templates and the demand is
    /// policy-limits; generic narrative path otherwise
    pub fn select_strategy<'a>(
        &'a self,
        case: &CaseData,
        drafter: &'a dyn DraftingService,
    ) -> Box<dyn CompositionStrategy + 'a> {
        match self.rules.get(&case.jurisdiction_code()) {
            Some(rules) if case.is_policy_limits() && !rules.templates.is_empty() => {
                Box::new(TemplatedJurisdictionStrategy::new(rules, &self.config))
            }
            _ => Box::new(GenericNarrativeStrategy::new(
                drafter,
                &self.config,
                &self.fee_schedule,
            )),
        }
    }

    pub async fn assemble(&self, case: &CaseData, drafter: &dyn DraftingService) -> AssembledDocument {
        let jurisdiction = case.jurisdiction_code();
        let strategy = self.select_strategy(case, drafter);
        let kind = strategy.kind();
        debug!(?kind, jurisdiction = %jurisdiction, demand_type = ?case.demand_type, "Selected composition strategy");

        let mut run = RunContext::new();
        let composition = strategy.compose(case, &mut run).await;
        let document = finalize(kind, jurisdiction, composition, run, &self.config.document);

        info!(
            strategy = ?document.strategy,
            sections = document.sections.len(),
            citations = document.citations.len(),
            anchors = document.anchors.len(),
            ready_to_serve = document.ready_to_serve(),
            "Demand assembled"
        );
        document
    }
}

/// Resolve the acceptance period and its business-day deadline
pub(crate) fn acceptance_terms(
    case: &CaseData,
    config: &DocumentConfig,
    run: &mut RunContext,
) -> AcceptanceTerms {
    let response_days = case.response_days.unwrap_or(config.default_response_days);
    let deadline = match case.demand_date_parsed() {
        Some(date) => BusinessCalendar::deadline_after(date, response_days),
        None => {
            if !case.demand_date.trim().is_empty() {
                run.warn(format!(
                    "Demand date '{}' is not an ISO-8601 date; no acceptance deadline computed",
                    case.demand_date.trim()
                ));
            }
            None
        }
    };
    AcceptanceTerms {
        response_days,
        deadline,
    }
}

fn finalize(
    strategy: StrategyKind,
    jurisdiction: String,
    composition: Composition,
    run: RunContext,
    config: &DocumentConfig,
) -> AssembledDocument {
    let mut sections = composition.sections;

    if !run.citations.is_empty() {
        let order = sections
            .iter()
            .map(Section::order)
            .max()
            .unwrap_or(0)
            .saturating_add(10);
        sections.push(Section::new(
            TABLE_OF_AUTHORITIES_KEY,
            "Table of Authorities",
            run.citations.to_table_of_authorities(),
            order,
            false,
        ));
    }

    // Stable: equal orders keep insertion order, so the banner stays first
    sections.sort_by_key(Section::order);

    let text = sections
        .iter()
        .map(Section::to_markdown)
        .collect::<Vec<_>>()
        .join(config.section_separator.as_str());

    AssembledDocument {
        strategy,
        jurisdiction,
        sections,
        text,
        citations: run.citations.into_vec(),
        anchors: run.anchors,
        validation: composition.validation,
        warnings: run.warnings,
    }
}
