//! Fixed templates for the generic narrative path
//!
//! Only the mechanical sections are templated; narrative sections come from
//! the drafting collaborator. Tables are rendered by [`crate::damages`] and
//! inserted as single token values.

use serde::{Deserialize, Serialize};

use super::engine::template_tokens;

pub const HEADER: &str = "\
{{demand_date}}

{{insurance_company}}
Attn: {{adjuster_name}}

Re: {{demand_type_label}}
Claimant: {{client_name}}
Your Insured: {{insured_name}}
Claim No.: {{claim_number}}
Date of Loss: {{incident_date}}";

pub const PROPERTY_DAMAGE: &str = "\
{{client_name}}'s property was damaged in the incident. Repair and \
replacement costs total {{property_damage}}, as documented in the enclosed \
estimates.";

pub const MEDICAL_EXPENSES: &str = "\
{{client_name}} has incurred the following medical expenses to date:

{{medical_table}}";

pub const REASONABLENESS: &str = "\
Each billed charge was compared with the customary benchmark for its billing \
code:

{{reasonableness_table}}";

pub const FUTURE_MEDICAL: &str = "\
{{client_name}}'s treating providers anticipate continuing care. The \
estimated cost of future medical treatment is {{future_medical}}.";

pub const DAMAGES_SUMMARY: &str = "\
{{damages_table}}

In light of the above, we demand {{demand_amount}} in full settlement of \
{{client_name}}'s claims.";

pub const EXHIBITS: &str = "\
The following exhibits are enclosed:

{{exhibits_list}}";

/// Information about a template shipped with the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateInfo {
    /// Section-key the template fills
    pub name: String,
    pub description: String,
    /// Tokens the template references
    pub required_inputs: Vec<String>,
}

impl TemplateInfo {
    /// Describe a template, reading its inputs from the `{{token}}`s it uses
    pub fn new(name: &str, description: &str, source: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required_inputs: template_tokens(source),
        }
    }
}

/// List the generic-path templates
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo::new("header", "Letter header with parties and claim numbers", HEADER),
        TemplateInfo::new("property_damage", "Property damage paragraph", PROPERTY_DAMAGE),
        TemplateInfo::new("medical_expenses", "Itemized medical expense table", MEDICAL_EXPENSES),
        TemplateInfo::new("reasonableness", "Billed charges against benchmarks", REASONABLENESS),
        TemplateInfo::new("future_medical", "Anticipated future care", FUTURE_MEDICAL),
        TemplateInfo::new("damages_summary", "Damages table and demand figure", DAMAGES_SUMMARY),
        TemplateInfo::new("exhibits", "Enclosed exhibits with source chips", EXHIBITS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_inputs() {
        let header = list_templates()
            .into_iter()
            .find(|t| t.name == "header")
            .unwrap();
        assert_eq!(header.required_inputs[0], "demand_date");
        assert!(header.required_inputs.contains(&"claim_number".to_string()));
    }

    #[test]
    fn test_every_template_has_inputs() {
        for template in list_templates() {
            assert!(
                !template.required_inputs.is_empty(),
                "{} has no tokens",
                template.name
            );
        }
    }
}
