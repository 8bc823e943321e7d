//! Error types for loading jurisdiction rule data

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to parse jurisdiction rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid rules for jurisdiction '{code}': {reason}")]
    Invalid { code: String, reason: String },
}
