use compliance_engine::ValidationResult;
use shared_types::Section;

pub const BANNER_KEY: &str = "compliance_banner";
pub const BANNER_ORDER: u32 = 0;

/// Notice placed first in a templated demand that failed validation.
///
/// Lists every missing key and every warning. The document is still
/// produced; the banner only withdraws the claim that it is ready to serve.
pub fn compliance_banner(validation: &ValidationResult, jurisdiction_name: &str) -> Section {
    let mut body = vec![format!(
        "WARNING: This {} demand is incomplete and is NOT ready to serve.",
        jurisdiction_name
    )];

    if !validation.missing.is_empty() {
        let missing: Vec<String> = validation.missing.iter().map(|k| format!("- {}", k)).collect();
        body.push(format!("Missing required sections:\n{}", missing.join("\n")));
    }
    if !validation.warnings.is_empty() {
        let warnings: Vec<String> = validation.warnings.iter().map(|w| format!("- {}", w)).collect();
        body.push(format!("Warnings:\n{}", warnings.join("\n")));
    }

    body.push(
        "Serving a time-limited demand that omits a legally required element may make \
         the offer unenforceable and may forfeit the ability to hold the carrier liable \
         for a judgment in excess of its policy limits. Complete every item above before \
         service."
            .to_string(),
    );

    Section::new(
        BANNER_KEY,
        "Compliance Notice: Incomplete Demand",
        body.join("\n\n"),
        BANNER_ORDER,
        false,
    )
}
