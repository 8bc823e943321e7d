//! Engine configuration loaded from TOML
//!
//! Every value has a default, so an empty file (or no file at all) yields a
//! working engine. Multipliers and thresholds here are drafting conventions,
//! not rules of law, and firms are expected to tune them.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub damages: DamagesConfig,
    #[serde(default)]
    pub reasonableness: ReasonablenessConfig,
    #[serde(default)]
    pub drafting: DraftingConfig,
    #[serde(default)]
    pub document: DocumentConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or a value is out of range (see [`EngineConfig::validate`]).
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// ```
    /// use demand_engine::config::EngineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_str("[damages]\npain_suffering_multiplier = 2.0\n")?;
    /// assert_eq!(config.damages.pain_suffering_multiplier, 2.0);
    /// assert_eq!(config.document.default_response_days, 30);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce nonsense output
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.damages.pain_suffering_multiplier < 0.0 {
            bail!("damages.pain_suffering_multiplier must not be negative");
        }
        if self.damages.demand_multiplier < 1.0 {
            bail!("damages.demand_multiplier must be at least 1.0");
        }
        let r = &self.reasonableness;
        if r.elevated_ratio <= 0.0 || r.excessive_ratio <= r.elevated_ratio {
            bail!(
                "reasonableness ratios must satisfy 0 < elevated_ratio ({}) < excessive_ratio ({})",
                r.elevated_ratio,
                r.excessive_ratio
            );
        }
        if self.drafting.timeout_ms == 0 {
            bail!("drafting.timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

/// Damages arithmetic conventions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamagesConfig {
    /// General damages as a multiple of medical specials (default: 3.0)
    #[serde(default = "default_pain_suffering_multiplier")]
    pub pain_suffering_multiplier: f64,
    /// Opening demand as a multiple of total damages (default: 1.5)
    #[serde(default = "default_demand_multiplier")]
    pub demand_multiplier: f64,
}

fn default_pain_suffering_multiplier() -> f64 {
    3.0
}

fn default_demand_multiplier() -> f64 {
    1.5
}

impl Default for DamagesConfig {
    fn default() -> Self {
        Self {
            pain_suffering_multiplier: default_pain_suffering_multiplier(),
            demand_multiplier: default_demand_multiplier(),
        }
    }
}

/// Billed-to-benchmark ratios for the reasonableness table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonablenessConfig {
    /// Ratio above which a charge is flagged as elevated (default: 1.5)
    #[serde(default = "default_elevated_ratio")]
    pub elevated_ratio: f64,
    /// Ratio above which a charge is flagged as excessive (default: 2.5)
    #[serde(default = "default_excessive_ratio")]
    pub excessive_ratio: f64,
}

fn default_elevated_ratio() -> f64 {
    1.5
}

fn default_excessive_ratio() -> f64 {
    2.5
}

impl Default for ReasonablenessConfig {
    fn default() -> Self {
        Self {
            elevated_ratio: default_elevated_ratio(),
            excessive_ratio: default_excessive_ratio(),
        }
    }
}

/// Drafting collaborator policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftingConfig {
    /// Per-attempt timeout in milliseconds (default: 30000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after the first failed attempt (default: 1)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Text used for a section whose drafting failed
    #[serde(default = "default_fallback_text")]
    pub fallback_text: String,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_retries() -> u32 {
    1
}

fn default_fallback_text() -> String {
    "[section to be written]".to_string()
}

impl DraftingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DraftingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
            fallback_text: default_fallback_text(),
        }
    }
}

/// Output document layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Separator placed between rendered sections
    #[serde(default = "default_section_separator")]
    pub section_separator: String,
    /// Acceptance period when the case data does not state one (default: 30)
    #[serde(default = "default_response_days")]
    pub default_response_days: u32,
}

fn default_section_separator() -> String {
    "\n\n---\n\n".to_string()
}

fn default_response_days() -> u32 {
    30
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            section_separator: default_section_separator(),
            default_response_days: default_response_days(),
        }
    }
}
