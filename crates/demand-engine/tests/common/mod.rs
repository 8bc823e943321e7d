//! Shared fixtures and stub drafting collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use citation_core::{Citation, SourceAnchor};
use demand_engine::{DraftingError, DraftingService};
use shared_types::{CaseData, DemandType, Exhibit, MedicalExpense, SupportedFact};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Returns the first line of the instruction, prefixed, so tests can tell
/// which section a draft was produced for
pub struct EchoDrafter {
    pub calls: AtomicUsize,
}

impl EchoDrafter {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftingService for EchoDrafter {
    async fn draft(&self, instructions: &str) -> Result<String, DraftingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first_line = instructions.lines().next().unwrap_or_default();
        Ok(format!("DRAFT: {}", first_line))
    }
}

/// Fails every request whose instruction mentions `needle`
pub struct FailingOn {
    pub needle: &'static str,
}

#[async_trait]
impl DraftingService for FailingOn {
    async fn draft(&self, instructions: &str) -> Result<String, DraftingError> {
        if instructions.contains(self.needle) {
            Err(DraftingError::Rejected("content policy".to_string()))
        } else {
            Ok("Drafted prose.".to_string())
        }
    }
}

fn expense(provider: &str, date: &str, code: &str, amount: f64) -> MedicalExpense {
    MedicalExpense {
        provider: provider.to_string(),
        date: date.to_string(),
        description: "Treatment".to_string(),
        billing_code: Some(code.to_string()),
        amount,
    }
}

/// California policy-limits demand with every templated field supplied
pub fn complete_california_case() -> CaseData {
    CaseData {
        jurisdiction: "CA".to_string(),
        demand_type: DemandType::PolicyLimits,
        client_name: "Maria Lopez".to_string(),
        defendant_name: "Dale Cooper".to_string(),
        insured_name: "Dale Cooper".to_string(),
        insurance_company: "Pacific Mutual Insurance".to_string(),
        adjuster_name: "Jordan Reyes".to_string(),
        claim_number: "PM-2024-0042".to_string(),
        policy_number: "AUTO-778812".to_string(),
        attorney_name: "Alex Kim".to_string(),
        firm_name: "Kim & Patel LLP".to_string(),
        firm_address: "100 Main St, Fresno, CA 93721".to_string(),
        incident_date: "2024-02-10".to_string(),
        incident_location: "Blackstone Ave and Shaw Ave, Fresno".to_string(),
        incident_description: "Rear-end collision at a red light.".to_string(),
        liability_facts: "Mr. Cooper struck the stopped vehicle at 35 mph.".to_string(),
        supporting_facts: vec![SupportedFact {
            text: "Mr. Cooper told police he was looking at his phone.".to_string(),
            anchor: SourceAnchor::in_exhibit("A").with_page(3).with_lines(12, 14),
        }],
        injuries: vec![
            "Cervical strain".to_string(),
            "L4-L5 disc herniation".to_string(),
        ],
        treatment_summary: "Emergency care followed by twelve weeks of physical therapy."
            .to_string(),
        lifestyle_impact: "Unable to lift her children for three months.".to_string(),
        medical_expenses: vec![
            expense("Community Regional ER", "2024-02-10", "99284", 4200.0),
            expense("Valley PT", "2024-03-01", "97110", 3800.0),
        ],
        property_damage: 6500.0,
        future_medical: 12000.0,
        lost_wages: 5400.0,
        policy_limit: 15000.0,
        demand_date: "2024-05-16".to_string(),
        response_days: Some(30),
        exhibits: vec![Exhibit {
            id: "A".to_string(),
            title: "Traffic collision report".to_string(),
            anchor: Some(SourceAnchor::in_exhibit("A").with_page(1)),
        }],
        authorities: vec![Citation::statute("Cal. Veh. Code", "21703")],
    }
}

/// Same facts as a standard (non-policy-limits) demand
pub fn standard_case() -> CaseData {
    CaseData {
        demand_type: DemandType::Standard,
        ..complete_california_case()
    }
}
