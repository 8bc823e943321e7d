//! Settlement-demand assembly engine
//!
//! Turns case data into an ordered list of titled sections and one
//! concatenated document:
//! - `{{token}}` template filling with visible `[REQUIRED: key]` markers
//! - damages arithmetic, expense tables and charge reasonableness
//! - narrative sections from an external drafting collaborator, bounded by
//!   timeout and retry with placeholder fallback
//! - jurisdiction-templated demands validated before they may be served
//!
//! ```no_run
//! use compliance_engine::RulesRegistry;
//! use demand_engine::{DemandAssembler, EngineConfig, FeeSchedule, OfflineDrafter};
//! use shared_types::CaseData;
//!
//! # async fn example(case: CaseData) {
//! let assembler = DemandAssembler::new(
//!     RulesRegistry::builtin(),
//!     FeeSchedule::new(),
//!     EngineConfig::default(),
//! );
//! let document = assembler.assemble(&case, &OfflineDrafter).await;
//! println!("{}", document.text);
//! # }
//! ```

pub mod assembler;
pub mod config;
pub mod damages;
pub mod drafting;
pub mod errors;
pub mod prompts;
pub mod templates;

pub use assembler::{AssembledDocument, CompositionStrategy, DemandAssembler, RunContext, StrategyKind};
pub use config::EngineConfig;
pub use damages::{format_currency, DamagesBreakdown, FeeSchedule};
pub use drafting::{draft_section, DraftOutcome, DraftingService, OfflineDrafter};
pub use errors::{DraftingError, EngineError};
pub use templates::{fill, list_templates, TemplateInfo};
