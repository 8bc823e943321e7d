//! Jurisdiction rules and compliance validation for settlement demands
//!
//! Determines whether an assembled demand contains every section its
//! jurisdiction requires before it may be treated as ready to serve.
//! Validation problems are data ([`ValidationResult`]), never errors.

pub mod calendar;
pub mod errors;
pub mod jurisdiction;
pub mod patterns;
pub mod states;
pub mod validator;

pub use calendar::BusinessCalendar;
pub use errors::RulesError;
pub use jurisdiction::{
    AdvisorySection, HeuristicCheck, JurisdictionRules, JurisdictionTemplateSet,
    RequiredElementSet, RulesRegistry, SectionHeuristic, TemplateEntry,
};
pub use validator::{validate_against, ComplianceValidator, ValidationResult};
