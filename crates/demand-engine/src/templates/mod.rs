//! Placeholder templates and the substitution engine

pub mod engine;
pub mod generic;

pub use engine::{fill, fill_tracked, template_tokens, tidy, FilledTemplate};
pub use generic::{list_templates, TemplateInfo};
