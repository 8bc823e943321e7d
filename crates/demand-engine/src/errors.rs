//! Error types for drafting and engine setup

use thiserror::Error;

/// Failure of the external drafting collaborator for one section.
///
/// Always contained to the section that asked for the draft; assembly of
/// other sections continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftingError {
    #[error("Drafting service unavailable: {0}")]
    Unavailable(String),

    #[error("Drafting timed out after {0}ms")]
    Timeout(u64),

    #[error("Drafting service returned an empty draft")]
    EmptyResponse,

    #[error("Drafting request rejected: {0}")]
    Rejected(String),
}

/// Errors loading engine inputs (config, fee schedule)
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid fee schedule: {0}")]
    InvalidFeeSchedule(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
