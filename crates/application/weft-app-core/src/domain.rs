use weft_core::{chains, ChainId, Event, RunId, RunStatus};

/// Presentation-facing console state: the replayable feed log, the focus
/// highlight, and the lifecycle of the active run.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub log: Vec<Event>,
    pub focus: Option<ChainId>,

    pub active_run: Option<RunId>,
    pub run_status: RunStatus,
    pub last_intent: Option<String>,

    pub last_error: Option<String>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self {
            log: Vec::new(),
            focus: Some(chains::USER_MAIN.to_string()),
            active_run: None,
            run_status: RunStatus::Idle,
            last_intent: None,
            last_error: None,
        }
    }
}

impl ConsoleState {
    pub fn is_processing(&self) -> bool {
        self.run_status == RunStatus::Running
    }
}
