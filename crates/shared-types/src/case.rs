//! Case-data input contract
//!
//! A flat record supplied by the caller. Every field is optional on the wire:
//! monetary amounts default to 0, text to "", lists to empty. Missing values
//! never abort assembly; they surface as visible placeholders downstream.

use chrono::NaiveDate;
use citation_core::{Citation, SourceAnchor};
use serde::{Deserialize, Serialize};

/// Kind of settlement demand being prepared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemandType {
    #[default]
    Standard,
    #[serde(alias = "underinsured_motorist", alias = "uim")]
    UnderinsuredMotorist,
    #[serde(alias = "policy_limits")]
    PolicyLimits,
}

impl DemandType {
    pub fn label(&self) -> &'static str {
        match self {
            DemandType::Standard => "Settlement Demand",
            DemandType::UnderinsuredMotorist => "Underinsured Motorist Claim Demand",
            DemandType::PolicyLimits => "Time-Limited Policy Limits Demand",
        }
    }
}

/// Itemized medical charge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalExpense {
    pub provider: String,
    /// ISO-8601 date of service
    pub date: String,
    pub description: String,
    /// CPT/HCPCS or other billing code used to look up a benchmark
    pub billing_code: Option<String>,
    pub amount: f64,
}

/// Exhibit attached to the demand package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exhibit {
    pub id: String,
    pub title: String,
    pub anchor: Option<SourceAnchor>,
}

/// Factual assertion tied to its evidentiary source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportedFact {
    pub text: String,
    pub anchor: SourceAnchor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseData {
    /// Two-letter state/region code, e.g. "CA"
    pub jurisdiction: String,
    pub demand_type: DemandType,

    // Parties
    pub client_name: String,
    pub defendant_name: String,
    pub insured_name: String,
    pub insurance_company: String,
    pub adjuster_name: String,
    pub claim_number: String,
    pub policy_number: String,
    pub attorney_name: String,
    pub firm_name: String,
    pub firm_address: String,

    // Incident
    pub incident_date: String,
    pub incident_location: String,
    pub incident_description: String,
    pub liability_facts: String,
    pub supporting_facts: Vec<SupportedFact>,

    // Injuries and treatment
    pub injuries: Vec<String>,
    pub treatment_summary: String,
    pub lifestyle_impact: String,
    pub medical_expenses: Vec<MedicalExpense>,

    // Money
    pub property_damage: f64,
    pub future_medical: f64,
    pub lost_wages: f64,
    pub policy_limit: f64,

    // Demand terms
    pub demand_date: String,
    pub response_days: Option<u32>,

    pub exhibits: Vec<Exhibit>,
    pub authorities: Vec<Citation>,
}

impl CaseData {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Normalized jurisdiction code ("ca " -> "CA")
    pub fn jurisdiction_code(&self) -> String {
        self.jurisdiction.trim().to_uppercase()
    }

    pub fn is_policy_limits(&self) -> bool {
        self.demand_type == DemandType::PolicyLimits
    }

    /// Sum of itemized medical charges
    pub fn medical_total(&self) -> f64 {
        self.medical_expenses.iter().map(|e| e.amount).sum()
    }

    pub fn incident_date_parsed(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.incident_date)
    }

    pub fn demand_date_parsed(&self) -> Option<NaiveDate> {
        parse_iso_date(&self.demand_date)
    }
}

/// Parse the date part of an ISO-8601 string ("2024-03-05" or "2024-03-05T10:00:00Z")
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// "2024-03-05" -> "March 5, 2024"; unparseable input is returned as given
pub fn format_long_date(raw: &str) -> String {
    match parse_iso_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.trim().to_string(),
    }
}
