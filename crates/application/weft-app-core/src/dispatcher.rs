use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use weft_core::{RunId, RunState, RunStatus, RunnerError, SubmitError};

use crate::bus::EventBus;
use crate::ports::{FocusObserver, IntentResolver};
use crate::runner::PipelineRunner;

/// Cloneable view of one accepted run: state snapshots, cancellation, and a
/// terminal-status subscription.
#[derive(Clone)]
pub struct RunHandle {
    runner: PipelineRunner,
}

impl RunHandle {
    pub fn run_id(&self) -> RunId {
        self.runner.run_id()
    }

    pub fn state(&self) -> RunState {
        self.runner.state()
    }

    pub fn status(&self) -> RunStatus {
        self.runner.status()
    }

    pub fn cancel(&self) -> Result<(), RunnerError> {
        self.runner.cancel()
    }

    pub fn watch_status(&self) -> watch::Receiver<RunStatus> {
        self.runner.watch_status()
    }
}

/// Public entry point: trims and validates the raw intent, resolves it to a
/// pipeline via the injected resolver, and starts a fresh runner. At most
/// one run may be in flight; overlapping submissions are rejected with
/// [`SubmitError::Busy`] and leave the in-flight run untouched.
pub struct IntentDispatcher {
    resolver: Arc<dyn IntentResolver>,
    bus: EventBus,
    focus: Option<Arc<dyn FocusObserver>>,
    active: Mutex<Option<RunHandle>>,
}

impl IntentDispatcher {
    pub fn new(
        resolver: Arc<dyn IntentResolver>,
        bus: EventBus,
        focus: Option<Arc<dyn FocusObserver>>,
    ) -> Self {
        Self {
            resolver,
            bus,
            focus,
            active: Mutex::new(None),
        }
    }

    pub fn submit(&self, text: &str) -> Result<RunHandle, SubmitError> {
        let intent = text.trim();
        if intent.is_empty() {
            return Err(SubmitError::EmptyIntent);
        }

        let mut active = self.active.lock().unwrap();
        if let Some(handle) = active.as_ref() {
            if handle.status() == RunStatus::Running {
                return Err(SubmitError::Busy);
            }
        }

        let spec = self.resolver.resolve(intent).map_err(SubmitError::Resolve)?;
        let runner = PipelineRunner::new(self.bus.clone(), self.focus.clone());
        runner.start(spec)?;
        let handle = RunHandle { runner };
        *active = Some(handle.clone());
        Ok(handle)
    }

    /// Handle of the most recently accepted run, if any.
    pub fn active_run(&self) -> Option<RunHandle> {
        self.active.lock().unwrap().clone()
    }
}
