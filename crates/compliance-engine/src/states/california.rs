//! California time-limited demand rules
//!
//! Cal. Code Civ. Proc. §§ 999-999.5 (SB 1155, effective January 1, 2023):
//! - Demand must be in writing, labeled as a time-limited demand, and state
//!   the time period within which it must be accepted (at least 30 days from
//!   transmission, 33 if sent by mail)
//! - Must offer a release in exchange for a sum certain within policy limits
//! - Must include the material facts, injuries and treatment, with records
//! - Must request disclosure of the liability insurance policies
//! - Must be sent to the insurer's designated address or the adjuster of record
//!
//! Bad-faith exposure (Comunale, Crisci) is strongly advised but not required.

use citation_core::Citation;

use crate::jurisdiction::{
    AdvisorySection, JurisdictionRules, JurisdictionTemplateSet, RequiredElementSet,
    SectionHeuristic, TemplateEntry,
};
use crate::patterns::{DEADLINE_KEYWORDS, SERVICE_KEYWORDS};

const CCP: &str = "Cal. Code Civ. Proc.";

const COVER_LETTER: &str = "\
{{demand_date}}

VIA CERTIFIED MAIL AND EMAIL

{{insurance_company}}
Attn: {{adjuster_name}}

Re: TIME-LIMITED DEMAND PURSUANT TO CODE OF CIVIL PROCEDURE SECTION 999
Our Client: {{client_name}}
Your Insured: {{insured_name}}
Claim No.: {{claim_number}}
Policy No.: {{policy_number}}
Date of Loss: {{incident_date}}

Dear {{adjuster_name}}:

This office represents {{client_name}} for injuries sustained on {{incident_date}} \
at {{incident_location}}. This letter is a time-limited demand made under \
Code of Civil Procedure sections 999 through 999.5.";

const POLICY_LIMITS_DEMAND: &str = "\
{{client_name}} offers to settle all claims against {{insured_name}} arising from \
the {{incident_date}} incident in exchange for payment of the full bodily injury \
policy limit of {{policy_limit}} under Policy No. {{policy_number}}.

In exchange for timely payment, {{client_name}} will execute a release of all \
claims against {{insured_name}} for this loss. The release will not include \
claims against any other party, lien holder, or insurer.";

const LIABILITY: &str = "\
On {{incident_date}}, at {{incident_location}}, {{defendant_name}} caused the \
collision that injured {{client_name}}.

{{liability_facts}} {{cited_authorities}}

{{supporting_facts}}";

const MEDICAL_SUMMARY: &str = "\
As a result of the incident, {{client_name}} suffered the following injuries:

{{injuries_list}}

{{treatment_summary}}

Medical specials to date total {{medical_total}}. Copies of the medical records \
and billing supporting this demand are enclosed.";

const DAMAGES_SUMMARY: &str = "\
{{damages_table}}

{{client_name}}'s damages substantially exceed the available limit of \
{{policy_limit}}.";

const STATUTORY_NOTICES: &str = "\
This demand is made pursuant to Code of Civil Procedure section 999.1. It is \
accompanied by the medical records and bills listed below. Under section 999.3, \
the recipient may accept this demand by providing written acceptance of the \
material terms in their entirety within the time stated. Any request for \
clarification or additional information made under section 999.3(b) does not \
by itself extend the acceptance period.

Enclosures:

{{exhibits_list}}";

const BAD_FAITH_NOTICE: &str = "\
{{insurance_company}} is on notice that a judgment against {{insured_name}} is \
likely to exceed the policy limit of {{policy_limit}}. An insurer that \
unreasonably refuses a reasonable offer within limits is liable for the entire \
resulting judgment, including the portion in excess of its limits.";

const POLICY_DISCLOSURE_REQUEST: &str = "\
Within the acceptance period, please disclose the existence and amount of all \
liability insurance policies, including any excess or umbrella coverage, that \
may provide coverage to {{insured_name}} for this loss, together with a \
declarations page for each policy.";

const DEADLINE_LANGUAGE: &str = "\
This offer remains open for {{response_days}} days from the date of transmission. \
The deadline for acceptance is {{deadline_date}}. If written acceptance and \
payment of {{demand_amount}} are not received by the deadline, this offer will \
expire and will not be renewed.";

const PROOF_OF_SERVICE: &str = "\
PROOF OF SERVICE

I, {{attorney_name}}, of {{firm_name}}, {{firm_address}}, declare that on \
{{demand_date}} I served this time-limited demand and its enclosures on \
{{insurance_company}}, Attn: {{adjuster_name}}, Claim No. {{claim_number}}, by \
certified mail, return receipt requested, and by email to the adjuster of record.

Service checklist:
- Demand labeled as time-limited demand under section 999
- Sent to the insurer's designated address or adjuster of record
- Medical records and bills enclosed
- Acceptance period of at least 30 days (33 if mailed) stated

I declare under penalty of perjury under the laws of the State of California \
that the foregoing is true and correct.

{{attorney_name}}";

/// California rule set: six required elements, nine templated sections
pub fn rules() -> JurisdictionRules {
    JurisdictionRules {
        code: "CA".to_string(),
        name: "California".to_string(),
        required: RequiredElementSet::new([
            "policy_limits_demand",
            "liability",
            "deadline_language",
            "proof_of_service",
            "policy_disclosure_request",
            "damages_summary",
        ]),
        templates: JurisdictionTemplateSet::new(vec![
            TemplateEntry::new("cover_letter", "Cover Letter", 10, COVER_LETTER)
                .citing(Citation::statute(CCP, "999")),
            TemplateEntry::new(
                "policy_limits_demand",
                "Policy Limits Demand",
                20,
                POLICY_LIMITS_DEMAND,
            )
            .citing(Citation::statute(CCP, "999.1")),
            TemplateEntry::new("liability", "Liability Analysis", 30, LIABILITY),
            TemplateEntry::new("medical_summary", "Medical Summary", 40, MEDICAL_SUMMARY),
            TemplateEntry::new("damages_summary", "Damages Summary", 50, DAMAGES_SUMMARY),
            TemplateEntry::new(
                "statutory_notices",
                "California Statutory Notices",
                60,
                STATUTORY_NOTICES,
            )
            .citing(Citation::statute(CCP, "999.1"))
            .citing(Citation::statute(CCP, "999.3")),
            TemplateEntry::new(
                "bad_faith_notice",
                "Notice of Excess Exposure",
                65,
                BAD_FAITH_NOTICE,
            )
            .citing(Citation::case(
                "Comunale v. Traders & General Ins. Co.",
                50,
                "Cal.2d",
                654,
                1958,
            ))
            .citing(Citation::case("Crisci v. Security Ins. Co.", 66, "Cal.2d", 425, 1967)),
            TemplateEntry::new(
                "policy_disclosure_request",
                "Request for Policy Disclosure",
                70,
                POLICY_DISCLOSURE_REQUEST,
            )
            .citing(Citation::statute(CCP, "999.2")),
            TemplateEntry::new(
                "deadline_language",
                "Deadline and Terms of Acceptance",
                80,
                DEADLINE_LANGUAGE,
            ),
            TemplateEntry::new("proof_of_service", "Proof of Service", 90, PROOF_OF_SERVICE),
        ]),
        advisories: vec![
            AdvisorySection {
                key: "medical_summary".to_string(),
                reason: "a medical-severity summary supports valuation of the claim".to_string(),
            },
            AdvisorySection {
                key: "bad_faith_notice".to_string(),
                reason: "notice of excess exposure preserves the carrier's bad-faith liability"
                    .to_string(),
            },
        ],
        heuristics: vec![
            SectionHeuristic::monetary("policy_limits_demand"),
            SectionHeuristic::monetary("damages_summary"),
            SectionHeuristic::keywords("deadline_language", DEADLINE_KEYWORDS),
            SectionHeuristic::keywords("proof_of_service", SERVICE_KEYWORDS),
        ],
        min_response_days: Some(30),
    }
}
