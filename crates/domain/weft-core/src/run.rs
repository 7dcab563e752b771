use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one pipeline execution.
pub type RunId = Uuid;

/// Lifecycle of a run. Transitions are Idle -> Running -> {Completed,
/// Cancelled}; Running -> Cancelled is the only back-edge and there is no
/// resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Cancelled)
    }
}

/// Snapshot of one active or finished pipeline execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub status: RunStatus,
    /// Index of the most recently emitted stage. `None` until stage 0 fires;
    /// increases by exactly one per emission and never reaches the stage
    /// count.
    pub current_stage: Option<usize>,
    pub started_at: Option<DateTime<Utc>>,
}

impl RunState {
    pub fn idle() -> Self {
        Self {
            status: RunStatus::Idle,
            current_stage: None,
            started_at: None,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::idle()
    }
}
