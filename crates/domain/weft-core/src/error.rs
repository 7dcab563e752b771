use crate::run::RunStatus;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("pipeline spec has no stages")]
    InvalidSpec,
    #[error("runner is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: RunStatus,
        actual: RunStatus,
    },
    #[error("failed to start run worker: {0}")]
    Worker(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("intent is empty")]
    EmptyIntent,
    #[error("a run is already in progress")]
    Busy,
    #[error("failed to resolve intent: {0}")]
    Resolve(#[source] anyhow::Error),
    #[error(transparent)]
    Runner(#[from] RunnerError),
}
