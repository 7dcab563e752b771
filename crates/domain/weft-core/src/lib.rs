pub mod error;
pub mod event;
pub mod run;
pub mod stage;

pub use error::{RunnerError, SubmitError};
pub use event::{chains, sources, ChainId, Event, EventKind, Source};
pub use run::{RunId, RunState, RunStatus};
pub use stage::{PipelineSpec, StageDefinition};
