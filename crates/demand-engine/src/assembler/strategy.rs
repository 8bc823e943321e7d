//! Composition strategies: how one demand's sections get produced

use async_trait::async_trait;
use compliance_engine::ValidationResult;
use serde::{Deserialize, Serialize};
use shared_types::{CaseData, Section};

use super::run::RunContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Every section filled from the jurisdiction's template set, then validated
    TemplatedJurisdiction,
    /// Narrative sections drafted by the collaborator, tables templated
    GenericNarrative,
}

/// Sections produced by a strategy, unsorted
#[derive(Debug, Clone, Default)]
pub struct Composition {
    pub sections: Vec<Section>,
    pub validation: Option<ValidationResult>,
}

#[async_trait]
pub trait CompositionStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Produce the strategy's sections, recording citations, anchors and
    /// warnings into `run`
    async fn compose(&self, case: &CaseData, run: &mut RunContext) -> Composition;
}
