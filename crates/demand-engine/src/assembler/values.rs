//! Case data flattened into template token values
//!
//! Text fields are inserted only when non-empty, so a blank field renders as
//! `[REQUIRED: key]`. A few optional blocks (supporting facts) are always
//! inserted, possibly empty, because their absence is not a defect.

use chrono::NaiveDate;
use shared_types::case::format_long_date;
use shared_types::{CaseData, Exhibit, SupportedFact};
use std::collections::HashMap;

use super::run::RunContext;
use crate::damages::{format_currency, medical_expense_table, DamagesBreakdown};

/// Acceptance terms resolved for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceTerms {
    pub response_days: u32,
    pub deadline: Option<NaiveDate>,
}

pub type TokenValues = HashMap<String, String>;

fn put_text(values: &mut TokenValues, key: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        values.insert(key.to_string(), value.to_string());
    }
}

fn put(values: &mut TokenValues, key: &str, value: String) {
    values.insert(key.to_string(), value);
}

pub fn token_values(
    case: &CaseData,
    damages: &DamagesBreakdown,
    terms: &AcceptanceTerms,
    run: &mut RunContext,
) -> TokenValues {
    let mut values = TokenValues::new();

    put_text(&mut values, "client_name", &case.client_name);
    put_text(&mut values, "defendant_name", &case.defendant_name);
    // The insured is usually the defendant
    let insured = if case.insured_name.trim().is_empty() {
        &case.defendant_name
    } else {
        &case.insured_name
    };
    put_text(&mut values, "insured_name", insured);
    put_text(&mut values, "insurance_company", &case.insurance_company);
    put_text(&mut values, "adjuster_name", &case.adjuster_name);
    put_text(&mut values, "claim_number", &case.claim_number);
    put_text(&mut values, "policy_number", &case.policy_number);
    put_text(&mut values, "attorney_name", &case.attorney_name);
    put_text(&mut values, "firm_name", &case.firm_name);
    put_text(&mut values, "firm_address", &case.firm_address);
    put_text(&mut values, "incident_location", &case.incident_location);
    put_text(&mut values, "liability_facts", &case.liability_facts);
    put_text(&mut values, "treatment_summary", &case.treatment_summary);
    put_text(&mut values, "lifestyle_impact", &case.lifestyle_impact);
    put_text(&mut values, "jurisdiction", &case.jurisdiction_code());
    put_text(&mut values, "demand_date", &format_long_date(&case.demand_date));
    put_text(&mut values, "incident_date", &format_long_date(&case.incident_date));
    put(&mut values, "demand_type_label", case.demand_type.label().to_string());

    if !case.injuries.is_empty() {
        let list: Vec<String> = case.injuries.iter().map(|i| format!("- {}", i)).collect();
        put(&mut values, "injuries_list", list.join("\n"));
    }

    put(&mut values, "medical_total", format_currency(damages.medical_specials));
    put(&mut values, "future_medical", format_currency(damages.future_medical));
    put(&mut values, "lost_wages", format_currency(damages.lost_wages));
    put(&mut values, "property_damage", format_currency(damages.property_damage));
    put(&mut values, "economic_damages", format_currency(damages.economic));
    put(&mut values, "general_damages", format_currency(damages.general));
    put(&mut values, "total_damages", format_currency(damages.total));
    put(&mut values, "demand_amount", format_currency(damages.demand));
    if case.policy_limit > 0.0 {
        put(&mut values, "policy_limit", format_currency(case.policy_limit));
    }

    put(&mut values, "response_days", terms.response_days.to_string());
    if let Some(deadline) = terms.deadline {
        put(&mut values, "deadline_date", deadline.format("%B %-d, %Y").to_string());
    }

    put(&mut values, "damages_table", damages.to_table());
    put(&mut values, "medical_table", medical_expense_table(case));
    put(&mut values, "supporting_facts", supporting_facts_block(&case.supporting_facts, run));
    put(&mut values, "exhibits_list", exhibits_list(&case.exhibits, run));

    run.cite(case.authorities.iter().cloned());
    put(&mut values, "cited_authorities", cited_authorities(case));

    values
}

/// "See A; B." over the case's own authorities; "" when there are none
pub fn cited_authorities(case: &CaseData) -> String {
    if case.authorities.is_empty() {
        return String::new();
    }
    let mut formatted: Vec<String> = Vec::new();
    for citation in &case.authorities {
        let cite = citation.formatted();
        if !formatted.contains(&cite) {
            formatted.push(cite);
        }
    }
    format!("See {}.", formatted.join("; "))
}

/// "Supporting evidence:" list with a chip per fact; "" when there are none
pub fn supporting_facts_block(facts: &[SupportedFact], run: &mut RunContext) -> String {
    let lines: Vec<String> = facts
        .iter()
        .enumerate()
        .filter(|(_, fact)| !fact.text.trim().is_empty())
        .map(|(i, fact)| {
            let context = format!("supporting fact {}", i + 1);
            match run.record_anchor(&fact.anchor, &context) {
                Some(chip) => format!("- {} {}", fact.text.trim(), chip),
                None => format!("- {}", fact.text.trim()),
            }
        })
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        format!("Supporting evidence:\n{}", lines.join("\n"))
    }
}

/// One line per exhibit with its chip and viewer query
pub fn exhibits_list(exhibits: &[Exhibit], run: &mut RunContext) -> String {
    if exhibits.is_empty() {
        return "No exhibits are attached.".to_string();
    }

    exhibits
        .iter()
        .map(|exhibit| {
            let mut line = format!("- Exhibit {}: {}", exhibit.id.trim(), exhibit.title.trim());
            if let Some(anchor) = &exhibit.anchor {
                let context = format!("exhibit {}", exhibit.id.trim());
                if let Some(chip) = run.record_anchor(anchor, &context) {
                    line.push_str(&format!(" {} (`?{}`)", chip, anchor.to_query()));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
