//! Instructions sent to the drafting collaborator for narrative sections
//!
//! Each builder states the task, then lists the case facts the prose may
//! rely on. Absent names appear as bracketed markers (`[client name]`) so a
//! draft that echoes them stays visibly incomplete.

use shared_types::case::format_long_date;
use shared_types::placeholder::name_marker;
use shared_types::CaseData;

use crate::damages::{format_currency, DamagesBreakdown};

fn or_marker(value: &str, label: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        name_marker(label)
    } else {
        value.to_string()
    }
}

struct Instruction {
    task: String,
    facts: Vec<String>,
    requirements: Vec<&'static str>,
}

impl Instruction {
    fn new(section_title: &str, case: &CaseData) -> Self {
        Self {
            task: format!(
                "Draft the \"{}\" section of a {} on behalf of {}.",
                section_title,
                case.demand_type.label().to_lowercase(),
                or_marker(&case.client_name, "client name")
            ),
            facts: Vec::new(),
            requirements: vec![
                "Write in a formal, persuasive register addressed to an insurance adjuster.",
                "Use only the facts listed; do not invent dates, amounts, or providers.",
            ],
        }
    }

    fn fact(mut self, label: &str, value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.facts.push(format!("- {}: {}", label, value));
        }
        self
    }

    fn require(mut self, requirement: &'static str) -> Self {
        self.requirements.push(requirement);
        self
    }

    fn render(self) -> String {
        let facts = if self.facts.is_empty() {
            "- (none provided)".to_string()
        } else {
            self.facts.join("\n")
        };
        let requirements: Vec<String> = self.requirements.iter().map(|r| format!("- {}", r)).collect();
        format!(
            "{}\n\nCase facts:\n{}\n\nRequirements:\n{}",
            self.task,
            facts,
            requirements.join("\n")
        )
    }
}

fn injuries(case: &CaseData) -> String {
    case.injuries.join("; ")
}

pub fn introduction(case: &CaseData) -> String {
    Instruction::new("Introduction", case)
        .fact("Defendant", or_marker(&case.defendant_name, "defendant name"))
        .fact("Insured", &case.insured_name)
        .fact("Date of incident", format_long_date(&case.incident_date))
        .fact("Location", &case.incident_location)
        .fact("Attorney", &case.attorney_name)
        .fact("Firm", &case.firm_name)
        .require("Identify the firm's representation and the purpose of the letter in two short paragraphs.")
        .render()
}

pub fn liability(case: &CaseData) -> String {
    let authorities: Vec<String> = case.authorities.iter().map(|c| c.formatted()).collect();
    Instruction::new("Facts and Liability", case)
        .fact("Defendant", or_marker(&case.defendant_name, "defendant name"))
        .fact("Incident", &case.incident_description)
        .fact("Liability facts", &case.liability_facts)
        .fact("Authorities to cite", authorities.join("; "))
        .require("Explain why the defendant is at fault; cite only the listed authorities.")
        .render()
}

pub fn injuries_summary(case: &CaseData) -> String {
    Instruction::new("Injuries", case)
        .fact("Diagnosed injuries", injuries(case))
        .require("Describe each injury in plain language without exaggeration.")
        .render()
}

pub fn treatment_narrative(case: &CaseData) -> String {
    let providers: Vec<&str> = case
        .medical_expenses
        .iter()
        .map(|e| e.provider.as_str())
        .filter(|p| !p.trim().is_empty())
        .collect();
    Instruction::new("Medical Treatment", case)
        .fact("Treatment summary", &case.treatment_summary)
        .fact("Providers", providers.join(", "))
        .fact("Medical specials", format_currency(case.medical_total()))
        .require("Narrate treatment chronologically.")
        .render()
}

pub fn lifestyle_impact(case: &CaseData) -> String {
    Instruction::new("Impact on Daily Life", case)
        .fact("Reported impact", &case.lifestyle_impact)
        .fact("Injuries", injuries(case))
        .require("Describe concrete losses in daily activities, work and family life.")
        .render()
}

pub fn comparable_outcomes(case: &CaseData) -> String {
    Instruction::new("Comparable Outcomes", case)
        .fact("Jurisdiction", case.jurisdiction_code())
        .fact("Injuries", injuries(case))
        .require("Summarize how claims with similar injuries have been valued in this jurisdiction.")
        .require("Do not cite specific verdicts unless they are listed above.")
        .render()
}

pub fn conclusion(case: &CaseData, damages: &DamagesBreakdown, response_days: u32) -> String {
    Instruction::new("Conclusion and Demand", case)
        .fact("Demand amount", format_currency(damages.demand))
        .fact("Total damages", format_currency(damages.total))
        .fact("Response period", format!("{} days", response_days))
        .fact("Adjuster", &case.adjuster_name)
        .require("State the demand amount exactly as listed and the period for response.")
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use citation_core::Citation;

    #[test]
    fn test_missing_names_are_marked() {
        let prompt = introduction(&CaseData::default());
        assert!(prompt.contains("on behalf of [client name]."));
        assert!(prompt.contains("- Defendant: [defendant name]"));
        assert!(!prompt.contains("Location"));
    }

    #[test]
    fn test_liability_lists_authorities() {
        let case = CaseData {
            client_name: "Ana Ruiz".to_string(),
            liability_facts: "Ran a red light.".to_string(),
            authorities: vec![Citation::statute("Cal. Veh. Code", "21453")],
            ..Default::default()
        };
        let prompt = liability(&case);
        assert!(prompt.starts_with("Draft the \"Facts and Liability\" section"));
        assert!(prompt.contains("- Liability facts: Ran a red light."));
        assert!(prompt.contains("- Authorities to cite: Cal. Veh. Code § 21453"));
    }

    #[test]
    fn test_empty_facts_placeholder() {
        let prompt = injuries_summary(&CaseData::default());
        assert!(prompt.contains("Case facts:\n- (none provided)"));
    }
}
