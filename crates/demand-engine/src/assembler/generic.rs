//! Generic narrative path: drafted prose plus templated tables
//!
//! Drafting calls for independent sections run concurrently; the assembler
//! re-sorts by order afterwards, so completion order does not matter.

use async_trait::async_trait;
use futures::future::join_all;
use shared_types::{CaseData, Section};
use tracing::debug;

use super::acceptance_terms;
use super::run::RunContext;
use super::strategy::{Composition, CompositionStrategy, StrategyKind};
use super::values::token_values;
use crate::config::EngineConfig;
use crate::damages::{assess_charges, reasonableness_table, DamagesBreakdown, FeeSchedule};
use crate::drafting::{draft_section, DraftingService};
use crate::prompts;
use crate::templates::{fill, generic, tidy};

struct DraftJob {
    key: &'static str,
    title: &'static str,
    order: u32,
    instructions: String,
}

impl DraftJob {
    fn new(key: &'static str, title: &'static str, order: u32, instructions: String) -> Self {
        Self { key, title, order, instructions }
    }
}

pub struct GenericNarrativeStrategy<'a> {
    drafter: &'a dyn DraftingService,
    config: &'a EngineConfig,
    fee_schedule: &'a FeeSchedule,
}

impl<'a> GenericNarrativeStrategy<'a> {
    pub fn new(
        drafter: &'a dyn DraftingService,
        config: &'a EngineConfig,
        fee_schedule: &'a FeeSchedule,
    ) -> Self {
        Self {
            drafter,
            config,
            fee_schedule,
        }
    }

    fn draft_jobs(&self, case: &CaseData, damages: &DamagesBreakdown, response_days: u32) -> Vec<DraftJob> {
        let mut jobs = vec![
            DraftJob::new("introduction", "Introduction", 20, prompts::introduction(case)),
            DraftJob::new("liability", "Facts and Liability", 30, prompts::liability(case)),
            DraftJob::new("injuries_summary", "Injuries", 50, prompts::injuries_summary(case)),
            DraftJob::new(
                "treatment_narrative",
                "Medical Treatment",
                60,
                prompts::treatment_narrative(case),
            ),
            DraftJob::new(
                "lifestyle_impact",
                "Impact on Daily Life",
                100,
                prompts::lifestyle_impact(case),
            ),
        ];
        if !case.jurisdiction_code().is_empty() && !case.injuries.is_empty() {
            jobs.push(DraftJob::new(
                "comparable_outcomes",
                "Comparable Outcomes",
                120,
                prompts::comparable_outcomes(case),
            ));
        }
        jobs.push(DraftJob::new(
            "conclusion",
            "Conclusion and Demand",
            130,
            prompts::conclusion(case, damages, response_days),
        ));
        jobs
    }
}

#[async_trait]
impl<'a> CompositionStrategy for GenericNarrativeStrategy<'a> {
    fn kind(&self) -> StrategyKind {
        StrategyKind::GenericNarrative
    }

    async fn compose(&self, case: &CaseData, run: &mut RunContext) -> Composition {
        let damages = DamagesBreakdown::compute(case, &self.config.damages);
        let terms = acceptance_terms(case, &self.config.document, run);
        let mut values = token_values(case, &damages, &terms, run);

        let assessments = assess_charges(case, self.fee_schedule, &self.config.reasonableness);
        if !assessments.is_empty() {
            values.insert(
                "reasonableness_table".to_string(),
                reasonableness_table(&assessments, &self.config.reasonableness),
            );
        }

        let mut sections = Vec::new();
        let mut templated = |key: &str, title: &str, order: u32, template: &str, required: bool| {
            sections.push(Section::new(key, title, tidy(&fill(template, &values)), order, required));
        };

        templated("header", "Header", 10, generic::HEADER, true);
        if damages.property_damage > 0.0 {
            templated("property_damage", "Property Damage", 40, generic::PROPERTY_DAMAGE, false);
        }
        templated("medical_expenses", "Medical Expenses", 70, generic::MEDICAL_EXPENSES, true);
        if !assessments.is_empty() {
            templated(
                "reasonableness",
                "Reasonableness of Charges",
                80,
                generic::REASONABLENESS,
                false,
            );
        }
        if damages.future_medical > 0.0 {
            templated("future_medical", "Future Medical Expenses", 90, generic::FUTURE_MEDICAL, false);
        }
        templated("damages_summary", "Damages Summary", 110, generic::DAMAGES_SUMMARY, true);
        templated("exhibits", "Exhibits", 140, generic::EXHIBITS, true);

        let jobs = self.draft_jobs(case, &damages, terms.response_days);
        debug!(jobs = jobs.len(), "Drafting narrative sections");
        let outcomes = join_all(
            jobs.iter()
                .map(|job| draft_section(self.drafter, job.key, &job.instructions, &self.config.drafting)),
        )
        .await;

        for (job, outcome) in jobs.iter().zip(outcomes) {
            if let Some(warning) = outcome.warning {
                run.warn(warning);
            }
            let mut content = outcome.text;
            if job.key == "liability" {
                let evidence = &values["supporting_facts"];
                if !evidence.is_empty() {
                    content = format!("{}\n\n{}", content, evidence);
                }
            }
            let optional = job.key == "comparable_outcomes";
            sections.push(Section::new(job.key, job.title, content, job.order, !optional));
        }

        Composition {
            sections,
            validation: None,
        }
    }
}
