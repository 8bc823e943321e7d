//! Argument parsing and input loading for the demand CLI

use anyhow::Context;
use clap::{Parser, ValueEnum};
use compliance_engine::states::covered_statutes;
use compliance_engine::{RulesRegistry, ValidationResult};
use demand_engine::{
    list_templates, AssembledDocument, DemandAssembler, EngineConfig, FeeSchedule, StrategyKind,
    TemplateInfo,
};
use serde::Serialize;
use shared_types::CaseData;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "demand-cli")]
#[command(version, about = "Assemble jurisdiction-aware settlement demands from case data")]
pub struct Args {
    /// Case data JSON file
    #[arg(long, required_unless_present = "list_templates")]
    pub case: Option<PathBuf>,

    /// Engine configuration TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fee schedule JSON file (billing code -> benchmark amount)
    #[arg(long)]
    pub fee_schedule: Option<PathBuf>,

    /// Extra jurisdiction rules TOML file(s), added to the built-in set
    #[arg(long)]
    pub rules: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Print only the compliance report; exit status 2 when not ready to serve
    #[arg(long)]
    pub validate_only: bool,

    /// Print the template catalog (generic and per-jurisdiction) as JSON and exit
    #[arg(long)]
    pub list_templates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

/// Compliance summary printed by `--validate-only`
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub jurisdiction: String,
    pub strategy: StrategyKind,
    pub ready_to_serve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn from_document(document: &AssembledDocument) -> Self {
        Self {
            jurisdiction: document.jurisdiction.clone(),
            strategy: document.strategy,
            ready_to_serve: document.ready_to_serve(),
            validation: document.validation.clone(),
            warnings: document.warnings.clone(),
        }
    }
}

pub fn load_case(path: &Path) -> anyhow::Result<CaseData> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file: {}", path.display()))?;
    CaseData::from_json(&content)
        .with_context(|| format!("Failed to parse case file: {}", path.display()))
}

/// Built-in jurisdictions plus every `[[jurisdiction]]` in the given TOML sources
pub fn build_registry<'a, I>(sources: I) -> anyhow::Result<RulesRegistry>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut registry = RulesRegistry::builtin();
    for (origin, source) in sources {
        let added = registry
            .extend_from_toml(source)
            .with_context(|| format!("Invalid jurisdiction rules in {}", origin))?;
        tracing::info!(origin, added, "Loaded jurisdiction rules");
    }
    Ok(registry)
}

/// Built-in jurisdictions plus every file passed with `--rules`
pub fn load_registry(args: &Args) -> anyhow::Result<RulesRegistry> {
    let mut sources = Vec::with_capacity(args.rules.len());
    for path in &args.rules {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
        sources.push((path.display().to_string(), content));
    }
    let registry = build_registry(
        sources
            .iter()
            .map(|(origin, content)| (origin.as_str(), content.as_str())),
    )?;
    tracing::debug!(jurisdictions = ?registry.codes(), "Rules registry ready");
    Ok(registry)
}

pub fn load_assembler(args: &Args) -> anyhow::Result<DemandAssembler> {
    let config = match &args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let fee_schedule = match &args.fee_schedule {
        Some(path) => FeeSchedule::from_file(path)
            .with_context(|| format!("Failed to load fee schedule: {}", path.display()))?,
        None => FeeSchedule::new(),
    };

    Ok(DemandAssembler::new(load_registry(args)?, fee_schedule, config))
}

/// Templates of one registered jurisdiction
#[derive(Debug, Clone, Serialize)]
pub struct JurisdictionTemplates {
    pub code: String,
    pub name: String,
    pub required: Vec<String>,
    pub templates: Vec<TemplateInfo>,
    /// Statutes cited by the templated sections
    pub statutes: Vec<String>,
}

/// Output of `--list-templates`
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCatalog {
    pub generic: Vec<TemplateInfo>,
    pub jurisdictions: Vec<JurisdictionTemplates>,
}

pub fn template_catalog(registry: &RulesRegistry) -> TemplateCatalog {
    let jurisdictions = registry
        .codes()
        .iter()
        .filter_map(|code| registry.get(code))
        .map(|rules| JurisdictionTemplates {
            code: rules.code.clone(),
            name: rules.name.clone(),
            required: rules.required.keys().to_vec(),
            templates: rules
                .templates
                .entries()
                .iter()
                .map(|entry| TemplateInfo::new(&entry.key, &entry.title, &entry.body))
                .collect(),
            statutes: covered_statutes(rules),
        })
        .collect();

    TemplateCatalog {
        generic: list_templates(),
        jurisdictions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demand_engine::OfflineDrafter;
    use pretty_assertions::assert_eq;

    const TX_RULES: &str = r#"
        [[jurisdiction]]
        code = "TX"
        name = "Texas"
        required = ["offer"]

        [[jurisdiction.templates]]
        key = "offer"
        title = "Stowers Demand"
        order = 10
        body = "{{client_name}} demands {{policy_limit}}."
    "#;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "demand-cli",
            "--case",
            "case.json",
            "--rules",
            "tx.toml",
            "--rules",
            "nv.toml",
            "--format",
            "json",
            "--validate-only",
        ])
        .unwrap();
        assert_eq!(args.case, Some(PathBuf::from("case.json")));
        assert_eq!(args.rules.len(), 2);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.validate_only);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_case_is_required() {
        assert!(Args::try_parse_from(["demand-cli"]).is_err());
    }

    #[test]
    fn test_list_templates_needs_no_case() {
        let args = Args::try_parse_from(["demand-cli", "--list-templates"]).unwrap();
        assert!(args.list_templates);
        assert!(args.case.is_none());
    }

    #[test]
    fn test_template_catalog_covers_generic_and_jurisdictions() {
        let registry = build_registry([("tx.toml", TX_RULES)]).unwrap();
        let catalog = template_catalog(&registry);

        let header = catalog.generic.iter().find(|t| t.name == "header").unwrap();
        assert_eq!(header.required_inputs[0], "demand_date");
        assert!(header.required_inputs.contains(&"claim_number".to_string()));

        let codes: Vec<&str> = catalog.jurisdictions.iter().map(|j| j.code.as_str()).collect();
        assert_eq!(codes, vec!["CA", "TX"]);

        let ca = &catalog.jurisdictions[0];
        assert_eq!(ca.required.len(), 6);
        assert!(ca.statutes.contains(&"Cal. Code Civ. Proc. \u{a7} 999".to_string()));

        let tx = &catalog.jurisdictions[1];
        assert_eq!(tx.templates[0].name, "offer");
        assert_eq!(tx.templates[0].required_inputs, vec!["client_name", "policy_limit"]);
        assert!(tx.statutes.is_empty());
    }

    #[test]
    fn test_build_registry_adds_to_builtin() {
        let registry = build_registry([("tx.toml", TX_RULES)]).unwrap();
        assert_eq!(registry.codes(), vec!["CA", "TX"]);
    }

    #[test]
    fn test_build_registry_names_bad_file() {
        let err = build_registry([("broken.toml", "[[jurisdiction]\n")]).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_case_file() {
        let err = load_case(Path::new("/nonexistent/case.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read case file"));
    }

    #[test]
    fn test_validation_report_for_loaded_jurisdiction() {
        let registry = build_registry([("tx.toml", TX_RULES)]).unwrap();
        let assembler = DemandAssembler::new(registry, FeeSchedule::new(), EngineConfig::default());
        let case = CaseData::from_json(
            r#"{"jurisdiction":"tx","demand_type":"policy-limits","client_name":"Ana Ruiz","policy_limit":30000}"#,
        )
        .unwrap();

        let document = tokio_test::block_on(assembler.assemble(&case, &OfflineDrafter));
        let report = ValidationReport::from_document(&document);

        assert_eq!(report.strategy, StrategyKind::TemplatedJurisdiction);
        assert!(report.ready_to_serve);
        assert_eq!(document.sections[0].content(), "Ana Ruiz demands $30,000.00.");
    }

    // Bundled demo inputs must stay loadable

    #[test]
    fn test_demo_inputs_assemble() {
        let config = EngineConfig::from_str(include_str!("../demos/engine.toml")).unwrap();
        let fee_schedule = FeeSchedule::from_json(include_str!("../demos/fee_schedule.json")).unwrap();
        let registry = build_registry([("nevada.toml", include_str!("../demos/nevada.toml"))]).unwrap();
        assert_eq!(registry.codes(), vec!["CA", "NV"]);
        assert_eq!(fee_schedule.len(), 2);

        let assembler = DemandAssembler::new(registry, fee_schedule, config);
        let case = CaseData::from_json(include_str!("../demos/ca_policy_limits.json")).unwrap();
        let document = tokio_test::block_on(assembler.assemble(&case, &OfflineDrafter));
        assert_eq!(document.strategy, StrategyKind::TemplatedJurisdiction);
        assert!(document.ready_to_serve());
        assert!(document.text.contains("June 17, 2024"));

        let nevada = CaseData {
            jurisdiction: "NV".to_string(),
            ..case
        };
        let document = tokio_test::block_on(assembler.assemble(&nevada, &OfflineDrafter));
        let validation = document.validation.clone().unwrap();
        assert!(validation.ok);
        assert!(!document.ready_to_serve());
        assert!(document
            .section("lien_statement")
            .unwrap()
            .content()
            .contains("[REQUIRED: lien_statement]"));
        assert!(document.section("table_of_authorities").is_some());
    }
}
