use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::event::{ChainId, EventKind, Source};

/// One described pipeline step: what to say, who says it, and how long to
/// wait after the previous step before saying it. Pure description data;
/// stages are not independently executable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Delay after the previous stage's emission (after `start` for stage 0).
    pub delay_ms: u64,
    pub source: Source,
    pub message: String,
    pub kind: EventKind,
    pub detail: Option<String>,
    /// Chain to highlight when this stage fires.
    pub focus: Option<ChainId>,
}

/// Ordered stage list plus an optional focus to restore once all stages have
/// fired. Immutable once handed to a runner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub stages: Vec<StageDefinition>,
    pub terminal_focus: Option<ChainId>,
}

impl PipelineSpec {
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Sum of all stage delays; a lower bound on the wall-clock duration of
    /// a full run.
    pub fn total_delay(&self) -> Duration {
        Duration::from_millis(self.stages.iter().map(|s| s.delay_ms).sum())
    }
}
