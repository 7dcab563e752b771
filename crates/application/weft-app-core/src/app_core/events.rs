use weft_core::{ChainId, Event, RunId, RunStatus};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Run lifecycle
    IntentAccepted { run_id: RunId, intent: String },
    RunFinished { run_id: RunId, status: RunStatus },

    // Feed & visualizer
    StageEmitted(Event),
    FocusShifted(Option<ChainId>),

    // User-visible errors
    UserError(String),
}
