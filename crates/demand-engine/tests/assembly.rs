//! End-to-end assembly through both composition strategies

mod common;

use citation_core::Citation;
use common::{complete_california_case, standard_case, EchoDrafter, FailingOn};
use compliance_engine::{
    JurisdictionRules, JurisdictionTemplateSet, RequiredElementSet, RulesRegistry, TemplateEntry,
};
use demand_engine::{DemandAssembler, EngineConfig, FeeSchedule, OfflineDrafter, StrategyKind};
use pretty_assertions::assert_eq;
use shared_types::{CaseData, DemandType, Section};

fn assembler() -> DemandAssembler {
    DemandAssembler::new(
        RulesRegistry::builtin(),
        FeeSchedule::new().with_benchmark("99284", 1400.0),
        EngineConfig::default(),
    )
}

fn keys(sections: &[Section]) -> Vec<&str> {
    sections.iter().map(Section::key).collect()
}

// ============================================================
// Templated jurisdiction path
// ============================================================

#[tokio::test]
async fn complete_california_demand_is_ready_to_serve() {
    let doc = assembler()
        .assemble(&complete_california_case(), &OfflineDrafter)
        .await;

    assert_eq!(doc.strategy, StrategyKind::TemplatedJurisdiction);
    assert_eq!(doc.jurisdiction, "CA");

    let validation = doc.validation.clone().unwrap();
    assert!(validation.ok);
    assert!(validation.missing.is_empty());
    assert!(validation.warnings.is_empty(), "{:?}", validation.warnings);
    assert!(doc.ready_to_serve());
    assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);

    assert_eq!(
        keys(&doc.sections),
        vec![
            "cover_letter",
            "policy_limits_demand",
            "liability",
            "medical_summary",
            "damages_summary",
            "statutory_notices",
            "bad_faith_notice",
            "policy_disclosure_request",
            "deadline_language",
            "proof_of_service",
            "table_of_authorities",
        ]
    );
    assert!(doc.text.starts_with("# Cover Letter\n\nMay 16, 2024"));
    assert!(!doc.text.contains("{{"));
    assert!(!doc.text.contains("[REQUIRED:"));
}

#[tokio::test]
async fn deadline_rolls_to_business_day() {
    let doc = assembler()
        .assemble(&complete_california_case(), &OfflineDrafter)
        .await;
    let deadline = doc.section("deadline_language").unwrap().content();
    // May 16 + 30 days is Saturday June 15, 2024
    assert!(deadline.contains("The deadline for acceptance is June 17, 2024."));
    assert!(deadline.contains("payment of $15,000.00"));
}

#[tokio::test]
async fn templated_demand_builds_table_of_authorities() {
    let doc = assembler()
        .assemble(&complete_california_case(), &OfflineDrafter)
        .await;

    // Case authorities first, then template authorities in emission order
    let formatted: Vec<String> = doc.citations.iter().map(Citation::formatted).collect();
    assert_eq!(
        formatted,
        vec![
            "Cal. Veh. Code \u{a7} 21703",
            "Cal. Code Civ. Proc. \u{a7} 999",
            "Cal. Code Civ. Proc. \u{a7} 999.1",
            "Cal. Code Civ. Proc. \u{a7} 999.3",
            "Comunale v. Traders & General Ins. Co., 50 Cal.2d 654 (1958)",
            "Crisci v. Security Ins. Co., 66 Cal.2d 425 (1967)",
            "Cal. Code Civ. Proc. \u{a7} 999.2",
        ]
    );

    let toa = doc.section("table_of_authorities").unwrap();
    assert_eq!(toa.order(), 100);
    assert!(toa.content().starts_with(
        "CASES\n\nComunale v. Traders & General Ins. Co., 50 Cal.2d 654 (1958)\n\
         Crisci v. Security Ins. Co., 66 Cal.2d 425 (1967)\n\nSTATUTES\n\n\
         Cal. Veh. Code \u{a7} 21703"
    ));
}

#[tokio::test]
async fn templated_demand_records_anchor_trail() {
    let doc = assembler()
        .assemble(&complete_california_case(), &OfflineDrafter)
        .await;

    let liability = doc.section("liability").unwrap().content();
    assert!(liability.contains(
        "- Mr. Cooper told police he was looking at his phone. [Ex. A, p.3, L12\u{2013}L14]"
    ));
    assert!(liability.contains("See Cal. Veh. Code \u{a7} 21703."));
    assert_eq!(
        doc.anchor_links(),
        vec!["exhibit=A&page=3&hl=L12-L14", "exhibit=A&page=1"]
    );
}

#[tokio::test]
async fn incomplete_california_demand_is_flagged_not_blocked() {
    let case = CaseData {
        jurisdiction: "ca".to_string(),
        demand_type: DemandType::PolicyLimits,
        ..Default::default()
    };
    let doc = assembler().assemble(&case, &OfflineDrafter).await;

    assert_eq!(doc.strategy, StrategyKind::TemplatedJurisdiction);
    let validation = doc.validation.clone().unwrap();
    // Every required template still produced text, so nothing is missing
    assert!(validation.ok);
    assert!(validation
        .warnings
        .iter()
        .any(|w| w.starts_with("Section 'policy_limits_demand' has unfilled placeholders")));
    assert!(validation
        .warnings
        .iter()
        .any(|w| w == "Section 'policy_limits_demand' does not state a dollar figure"));
    assert!(!doc.ready_to_serve());
    assert!(doc.text.contains("[REQUIRED: client_name]"));
    assert!(doc.section("compliance_banner").is_none());
}

#[tokio::test]
async fn short_response_period_warns() {
    let case = CaseData {
        response_days: Some(20),
        ..complete_california_case()
    };
    let doc = assembler().assemble(&case, &OfflineDrafter).await;
    assert_eq!(
        doc.warnings,
        vec!["Response period of 20 days is shorter than the 30-day minimum for California"]
    );
}

#[tokio::test]
async fn missing_required_section_gets_banner_first() {
    let mut registry = RulesRegistry::new();
    registry.register(JurisdictionRules {
        code: "NV".to_string(),
        name: "Nevada".to_string(),
        required: RequiredElementSet::new(["offer", "lien_statement"]),
        templates: JurisdictionTemplateSet::new(vec![TemplateEntry::new(
            "offer",
            "Offer",
            10,
            "{{client_name}} will accept {{policy_limit}}.",
        )]),
        advisories: vec![],
        heuristics: vec![],
        min_response_days: None,
    });
    let assembler = DemandAssembler::new(registry, FeeSchedule::new(), EngineConfig::default());

    let case = CaseData {
        jurisdiction: "NV".to_string(),
        ..complete_california_case()
    };
    let doc = assembler.assemble(&case, &OfflineDrafter).await;

    let validation = doc.validation.clone().unwrap();
    assert!(!validation.ok);
    assert_eq!(validation.missing, vec!["lien_statement"]);
    assert_eq!(keys(&doc.sections), vec!["compliance_banner", "offer", "table_of_authorities"]);

    let banner = &doc.sections[0];
    assert_eq!(banner.order(), 0);
    assert!(banner.content().contains("- lien_statement"));
    assert!(doc.text.starts_with("# Compliance Notice: Incomplete Demand"));
    assert!(!doc.ready_to_serve());
}

// ============================================================
// Generic narrative path
// ============================================================

#[tokio::test]
async fn standard_demand_uses_generic_path_in_fixed_order() {
    let drafter = EchoDrafter::new();
    let doc = assembler().assemble(&standard_case(), &drafter).await;

    assert_eq!(doc.strategy, StrategyKind::GenericNarrative);
    assert!(doc.validation.is_none());
    assert!(!doc.ready_to_serve());
    assert_eq!(drafter.calls(), 7);
    assert_eq!(
        keys(&doc.sections),
        vec![
            "header",
            "introduction",
            "liability",
            "property_damage",
            "injuries_summary",
            "treatment_narrative",
            "medical_expenses",
            "reasonableness",
            "future_medical",
            "lifestyle_impact",
            "damages_summary",
            "comparable_outcomes",
            "conclusion",
            "exhibits",
            "table_of_authorities",
        ]
    );

    let orders: Vec<u32> = doc.sections.iter().map(Section::order).collect();
    assert_eq!(
        orders,
        vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150]
    );
}

#[tokio::test]
async fn generic_sections_carry_drafts_tables_and_evidence() {
    let doc = assembler().assemble(&standard_case(), &EchoDrafter::new()).await;

    let intro = doc.section("introduction").unwrap().content();
    assert_eq!(
        intro,
        "DRAFT: Draft the \"Introduction\" section of a settlement demand on behalf of Maria Lopez."
    );

    let liability = doc.section("liability").unwrap().content();
    assert!(liability.starts_with("DRAFT: Draft the \"Facts and Liability\" section"));
    assert!(liability.contains("Supporting evidence:\n- Mr. Cooper told police"));

    let damages = doc.section("damages_summary").unwrap().content();
    assert!(damages.contains("| **Total damages** | **$91,900.00** |"));
    assert!(damages.contains("we demand $137,850.00 in full settlement"));

    let reasonableness = doc.section("reasonableness").unwrap().content();
    assert!(reasonableness.contains("| Community Regional ER | 99284 | $4,200.00 | $1,400.00 | 300% |"));

    let exhibits = doc.section("exhibits").unwrap().content();
    assert!(exhibits.contains("- Exhibit A: Traffic collision report [Ex. A, p.1] (`?exhibit=A&page=1`)"));

    assert_eq!(doc.citations, vec![Citation::statute("Cal. Veh. Code", "21703")]);
}

#[tokio::test]
async fn drafting_failure_is_contained_to_its_section() {
    let drafter = FailingOn {
        needle: "Impact on Daily Life",
    };
    let doc = assembler().assemble(&standard_case(), &drafter).await;

    assert_eq!(
        doc.section("lifestyle_impact").unwrap().content(),
        "[section to be written]"
    );
    assert_eq!(doc.section("introduction").unwrap().content(), "Drafted prose.");
    assert_eq!(doc.section("conclusion").unwrap().content(), "Drafted prose.");
    assert_eq!(doc.warnings.len(), 1);
    assert!(doc.warnings[0].contains("'lifestyle_impact'"));
    assert!(doc.warnings[0].contains("content policy"));
}

#[tokio::test]
async fn empty_case_still_produces_a_flagged_draft() {
    let doc = assembler().assemble(&CaseData::default(), &OfflineDrafter).await;

    assert_eq!(doc.strategy, StrategyKind::GenericNarrative);
    assert_eq!(
        keys(&doc.sections),
        vec![
            "header",
            "introduction",
            "liability",
            "injuries_summary",
            "treatment_narrative",
            "medical_expenses",
            "lifestyle_impact",
            "damages_summary",
            "conclusion",
            "exhibits",
        ]
    );
    let header = doc.section("header").unwrap().content();
    assert!(header.contains("Claimant: [REQUIRED: client_name]"));
    assert_eq!(doc.warnings.len(), 6);
    assert!(doc.citations.is_empty());
}

#[tokio::test]
async fn policy_limits_in_unknown_jurisdiction_goes_generic() {
    let case = CaseData {
        jurisdiction: "TX".to_string(),
        ..complete_california_case()
    };
    let doc = assembler().assemble(&case, &EchoDrafter::new()).await;
    assert_eq!(doc.strategy, StrategyKind::GenericNarrative);
    assert!(doc.section("policy_limits_demand").is_none());
    // Policy-limits demands ask for the limit on either path
    assert!(doc
        .section("damages_summary")
        .unwrap()
        .content()
        .contains("we demand $15,000.00"));
}

// ============================================================
// Isolation between concurrent runs
// ============================================================

#[tokio::test]
async fn concurrent_runs_do_not_share_citations() {
    let assembler = assembler();
    let drafter = EchoDrafter::new();

    let texas = CaseData {
        jurisdiction: "TX".to_string(),
        authorities: vec![Citation::case("Stowers Furniture Co. v. American Indemnity Co.", 15, "S.W.2d", 544, 1929)
            .with_court("Tex. Comm'n App.")],
        ..standard_case()
    };
    let california = complete_california_case();

    let (tx_doc, ca_doc) = tokio::join!(
        assembler.assemble(&texas, &drafter),
        assembler.assemble(&california, &drafter)
    );

    assert!(tx_doc
        .citations
        .iter()
        .all(|c| !c.formatted().contains("Code Civ. Proc.")));
    assert!(ca_doc
        .citations
        .iter()
        .all(|c| !c.formatted().contains("Stowers")));
    assert_eq!(tx_doc.citations.len(), 1);
}

#[tokio::test]
async fn assembled_document_serializes() {
    let doc = assembler()
        .assemble(&complete_california_case(), &OfflineDrafter)
        .await;
    let json = doc.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["strategy"], "templated_jurisdiction");
    assert_eq!(value["validation"]["ok"], true);
    assert_eq!(value["citations"][0]["kind"], "statute");
    assert_eq!(value["anchors"][0]["exhibitId"], "A");
}
