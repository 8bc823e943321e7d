//! Damages arithmetic, charge reasonableness, and the tables rendered from them

use serde::{Deserialize, Serialize};
use shared_types::case::format_long_date;
use shared_types::CaseData;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::config::{DamagesConfig, ReasonablenessConfig};
use crate::errors::EngineError;

/// Computed damages for one case. Amounts are rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamagesBreakdown {
    pub medical_specials: f64,
    pub future_medical: f64,
    pub lost_wages: f64,
    pub property_damage: f64,
    pub economic: f64,
    pub general: f64,
    pub total: f64,
    pub demand: f64,
}

impl DamagesBreakdown {
    pub fn compute(case: &CaseData, config: &DamagesConfig) -> Self {
        let medical_specials = round_cents(case.medical_total());
        let future_medical = round_cents(case.future_medical);
        let lost_wages = round_cents(case.lost_wages);
        let property_damage = round_cents(case.property_damage);

        let economic = round_cents(medical_specials + future_medical + lost_wages + property_damage);
        let general = round_cents((medical_specials + future_medical) * config.pain_suffering_multiplier);
        let total = round_cents(economic + general);

        let demand = if case.is_policy_limits() && case.policy_limit > 0.0 {
            round_cents(case.policy_limit)
        } else {
            round_cents(total * config.demand_multiplier)
        };

        Self {
            medical_specials,
            future_medical,
            lost_wages,
            property_damage,
            economic,
            general,
            total,
            demand,
        }
    }

    /// Markdown table of damage categories; zero optional lines are omitted
    pub fn to_table(&self) -> String {
        let mut rows = vec![
            "| Category | Amount |".to_string(),
            "|---|---:|".to_string(),
            row("Past medical expenses", self.medical_specials),
        ];
        if self.future_medical > 0.0 {
            rows.push(row("Future medical expenses", self.future_medical));
        }
        if self.lost_wages > 0.0 {
            rows.push(row("Lost wages", self.lost_wages));
        }
        if self.property_damage > 0.0 {
            rows.push(row("Property damage", self.property_damage));
        }
        rows.push(bold_row("Economic damages", self.economic));
        rows.push(row("General damages (pain and suffering)", self.general));
        rows.push(bold_row("Total damages", self.total));
        rows.join("\n")
    }
}

fn row(label: &str, amount: f64) -> String {
    format!("| {} | {} |", label, format_currency(amount))
}

fn bold_row(label: &str, amount: f64) -> String {
    format!("| **{}** | **{}** |", label, format_currency(amount))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `12345.678` -> `"$12,345.68"`, negatives as `"-$5.00"`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Itemized expense table with a total row
pub fn medical_expense_table(case: &CaseData) -> String {
    if case.medical_expenses.is_empty() {
        return "No itemized medical expenses were provided.".to_string();
    }

    let mut rows = vec![
        "| Provider | Date of Service | Description | Amount |".to_string(),
        "|---|---|---|---:|".to_string(),
    ];
    for expense in &case.medical_expenses {
        rows.push(format!(
            "| {} | {} | {} | {} |",
            expense.provider,
            format_long_date(&expense.date),
            expense.description,
            format_currency(expense.amount)
        ));
    }
    rows.push(format!(
        "| **Total** | | | **{}** |",
        format_currency(case.medical_total())
    ));
    rows.join("\n")
}

/// Benchmark amounts by billing code.
///
/// Constructed by the caller and passed into the assembler; loads from a
/// flat JSON object such as `{"99283": 310.0, "72125": 420.0}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeeSchedule {
    benchmarks: HashMap<String, f64>,
}

impl FeeSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let schedule: Self = serde_json::from_str(json)?;
        if let Some((code, amount)) = schedule.benchmarks.iter().find(|(_, a)| **a <= 0.0) {
            return Err(EngineError::InvalidFeeSchedule(format!(
                "benchmark for {} must be positive, got {}",
                code, amount
            )));
        }
        Ok(schedule)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn with_benchmark(mut self, code: impl Into<String>, amount: f64) -> Self {
        self.benchmarks.insert(code.into(), amount);
        self
    }

    pub fn benchmark(&self, code: &str) -> Option<f64> {
        self.benchmarks.get(code.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// Classification of a billed charge against its benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeTier {
    WithinRange,
    Elevated,
    Excessive,
}

impl ChargeTier {
    pub fn classify(ratio: f64, config: &ReasonablenessConfig) -> Self {
        if ratio <= config.elevated_ratio {
            ChargeTier::WithinRange
        } else if ratio <= config.excessive_ratio {
            ChargeTier::Elevated
        } else {
            ChargeTier::Excessive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChargeTier::WithinRange => "Within customary range",
            ChargeTier::Elevated => "Above benchmark",
            ChargeTier::Excessive => "Substantially above benchmark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeAssessment {
    pub provider: String,
    pub billing_code: String,
    pub billed: f64,
    pub benchmark: f64,
    pub ratio: f64,
    pub tier: ChargeTier,
}

/// Assess every expense whose billing code has a benchmark
pub fn assess_charges(
    case: &CaseData,
    schedule: &FeeSchedule,
    config: &ReasonablenessConfig,
) -> Vec<ChargeAssessment> {
    case.medical_expenses
        .iter()
        .filter_map(|expense| {
            let code = expense.billing_code.as_deref()?.trim();
            let benchmark = schedule.benchmark(code)?;
            let ratio = expense.amount / benchmark;
            Some(ChargeAssessment {
                provider: expense.provider.clone(),
                billing_code: code.to_string(),
                billed: expense.amount,
                benchmark,
                ratio,
                tier: ChargeTier::classify(ratio, config),
            })
        })
        .collect()
}

/// Table of assessed charges, followed by the thresholds used
pub fn reasonableness_table(assessments: &[ChargeAssessment], config: &ReasonablenessConfig) -> String {
    let mut rows = vec![
        "| Provider | Code | Billed | Benchmark | Ratio | Assessment |".to_string(),
        "|---|---|---:|---:|---:|---|".to_string(),
    ];
    for a in assessments {
        rows.push(format!(
            "| {} | {} | {} | {} | {:.0}% | {} |",
            a.provider,
            a.billing_code,
            format_currency(a.billed),
            format_currency(a.benchmark),
            a.ratio * 100.0,
            a.tier.label()
        ));
    }
    format!(
        "{}\n\nCharges at or below {:.0}% of benchmark are within the customary range; \
         charges above {:.0}% are substantially above benchmark.",
        rows.join("\n"),
        config.elevated_ratio * 100.0,
        config.excessive_ratio * 100.0
    )
}
