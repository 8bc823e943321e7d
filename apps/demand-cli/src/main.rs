//! Settlement demand CLI
//!
//! Reads case JSON, assembles the demand, and writes it to stdout. Logs go
//! to stderr so stdout carries only the document.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use demand_cli::{Args, OutputFormat};
use demand_engine::OfflineDrafter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("demand-cli v{}", env!("CARGO_PKG_VERSION"));

    if args.list_templates {
        let registry = demand_cli::load_registry(&args)?;
        let catalog = demand_cli::template_catalog(&registry);
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(ExitCode::SUCCESS);
    }

    let case_path = args.case.as_deref().context("--case is required")?;
    let assembler = demand_cli::load_assembler(&args)?;
    let case = demand_cli::load_case(case_path)?;
    tracing::info!(
        jurisdiction = %case.jurisdiction_code(),
        demand_type = ?case.demand_type,
        "Loaded case data"
    );

    // No drafting service is wired into the CLI; narrative sections get fallback text
    let document = assembler.assemble(&case, &OfflineDrafter).await;

    if args.validate_only {
        let report = demand_cli::ValidationReport::from_document(&document);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(if report.ready_to_serve {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(2)
        });
    }

    let output = match args.format {
        OutputFormat::Markdown => document.text,
        OutputFormat::Json => document.to_json()?,
    };
    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}
