//! Seam to the external prose-drafting collaborator
//!
//! The collaborator is opaque: instructions in, prose out. Every call is
//! bounded by a timeout, retried per [`DraftingConfig::max_retries`], and on
//! final failure replaced by the configured fallback text. A failure never
//! leaves the section that asked for it.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::DraftingConfig;
use crate::errors::DraftingError;

/// Produces prose for one section from a structured instruction
#[async_trait]
pub trait DraftingService: Send + Sync {
    async fn draft(&self, instructions: &str) -> Result<String, DraftingError>;
}

/// Drafter for runs with no collaborator configured.
///
/// Always fails, so every narrative section gets the fallback text and a
/// run warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineDrafter;

#[async_trait]
impl DraftingService for OfflineDrafter {
    async fn draft(&self, _instructions: &str) -> Result<String, DraftingError> {
        Err(DraftingError::Unavailable(
            "no drafting service configured".to_string(),
        ))
    }
}

/// Prose for one section, or the fallback and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftOutcome {
    pub text: String,
    /// Set when the fallback text was used
    pub warning: Option<String>,
}

impl DraftOutcome {
    pub fn is_fallback(&self) -> bool {
        self.warning.is_some()
    }
}

/// Draft one section with timeout, retry and fallback
pub async fn draft_section(
    drafter: &dyn DraftingService,
    section_key: &str,
    instructions: &str,
    config: &DraftingConfig,
) -> DraftOutcome {
    let attempts = config.max_retries.saturating_add(1);
    let mut last_error = DraftingError::EmptyResponse;

    for attempt in 1..=attempts {
        let result = tokio::time::timeout(config.timeout(), drafter.draft(instructions)).await;
        let error = match result {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!(section = section_key, attempt, "Section drafted");
                return DraftOutcome {
                    text: text.trim().to_string(),
                    warning: None,
                };
            }
            Ok(Ok(_)) => DraftingError::EmptyResponse,
            Ok(Err(e)) => e,
            Err(_elapsed) => DraftingError::Timeout(config.timeout_ms),
        };

        warn!(
            section = section_key,
            attempt,
            max_attempts = attempts,
            error = %error,
            "Drafting attempt failed"
        );
        last_error = error;
    }

    DraftOutcome {
        text: config.fallback_text.clone(),
        warning: Some(format!(
            "Section '{}' could not be drafted ({}); fallback text inserted",
            section_key, last_error
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Scripted {
        fail_first: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl DraftingService for Scripted {
        async fn draft(&self, instructions: &str) -> Result<String, DraftingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.fail_first {
                Err(DraftingError::Rejected("quota".to_string()))
            } else {
                Ok(format!("  Drafted: {}  ", instructions))
            }
        }
    }

    struct Slow;

    #[async_trait]
    impl DraftingService for Slow {
        async fn draft(&self, _instructions: &str) -> Result<String, DraftingError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".to_string())
        }
    }

    fn config(timeout_ms: u64, max_retries: u32) -> DraftingConfig {
        DraftingConfig {
            timeout_ms,
            max_retries,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_success_is_trimmed() {
        let drafter = Scripted { fail_first: 0, calls: AtomicU32::new(0) };
        let outcome = draft_section(&drafter, "introduction", "intro", &config(1000, 1)).await;
        assert_eq!(outcome.text, "Drafted: intro");
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_single_retry_recovers() {
        let drafter = Scripted { fail_first: 1, calls: AtomicU32::new(0) };
        let outcome = draft_section(&drafter, "introduction", "intro", &config(1000, 1)).await;
        assert_eq!(outcome.text, "Drafted: intro");
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_fall_back() {
        let drafter = Scripted { fail_first: 5, calls: AtomicU32::new(0) };
        let outcome = draft_section(&drafter, "conclusion", "x", &config(1000, 1)).await;
        assert_eq!(outcome.text, "[section to be written]");
        assert_eq!(drafter.calls.load(Ordering::SeqCst), 2);
        let warning = outcome.warning.unwrap();
        assert!(warning.contains("'conclusion'"));
        assert!(warning.contains("quota"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_falls_back() {
        let outcome = draft_section(&Slow, "lifestyle_impact", "x", &config(50, 0)).await;
        assert!(outcome.is_fallback());
        assert!(outcome.warning.unwrap().contains("timed out after 50ms"));
    }

    #[tokio::test]
    async fn test_offline_drafter_falls_back() {
        let outcome = draft_section(&OfflineDrafter, "introduction", "x", &config(1000, 0)).await;
        assert_eq!(outcome.text, "[section to be written]");
        assert!(outcome.warning.unwrap().contains("no drafting service configured"));
    }
}
