use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use weft_core::{Event, PipelineSpec, RunId, RunState, RunStatus, RunnerError};

use crate::bus::EventBus;
use crate::ports::FocusObserver;

/// Walks a [`PipelineSpec`], publishing one event per stage onto the bus
/// after that stage's delay has elapsed. Each stage is scheduled only after
/// the previous one has been emitted, so events leave in strictly increasing
/// stage order. One runner drives at most one run; the dispatcher creates a
/// fresh runner per accepted intent.
#[derive(Clone)]
pub struct PipelineRunner {
    bus: EventBus,
    focus: Option<Arc<dyn FocusObserver>>,
    shared: Arc<RunnerShared>,
}

struct RunnerShared {
    run_id: RunId,
    state: Mutex<RunState>,
    /// Serializes stage emissions with `cancel`: whoever holds this decides
    /// whether the next event may leave. Lock order is emission before
    /// state.
    emission: Mutex<()>,
    cancel: CancellationToken,
    status_tx: watch::Sender<RunStatus>,
}

impl PipelineRunner {
    pub fn new(bus: EventBus, focus: Option<Arc<dyn FocusObserver>>) -> Self {
        let (status_tx, _) = watch::channel(RunStatus::Idle);
        Self {
            bus,
            focus,
            shared: Arc::new(RunnerShared {
                run_id: uuid::Uuid::new_v4(),
                state: Mutex::new(RunState::idle()),
                emission: Mutex::new(()),
                cancel: CancellationToken::new(),
                status_tx,
            }),
        }
    }

    pub fn run_id(&self) -> RunId {
        self.shared.run_id
    }

    pub fn state(&self) -> RunState {
        self.shared.state.lock().unwrap().clone()
    }

    pub fn status(&self) -> RunStatus {
        self.state().status
    }

    /// Status subscription; the channel settles exactly once on `Completed`
    /// or `Cancelled`. Drop the receiver to unsubscribe.
    pub fn watch_status(&self) -> watch::Receiver<RunStatus> {
        self.shared.status_tx.subscribe()
    }

    /// Starts walking `spec` on a background worker. Stage 0 is scheduled
    /// immediately (its delay is applied from now).
    pub fn start(&self, spec: PipelineSpec) -> Result<(), RunnerError> {
        if spec.is_empty() {
            return Err(RunnerError::InvalidSpec);
        }

        let rt = crate::async_runtime::runtime().map_err(|e| RunnerError::Worker(e.to_string()))?;

        let mut state = self.shared.state.lock().unwrap();
        if state.status != RunStatus::Idle {
            return Err(RunnerError::InvalidState {
                expected: RunStatus::Idle,
                actual: state.status,
            });
        }

        let bus = self.bus.clone();
        let focus = self.focus.clone();
        let shared = self.shared.clone();
        std::thread::Builder::new()
            .name("weft-run".into())
            .spawn(move || rt.block_on(drive(spec, bus, focus, shared)))
            .map_err(|e| RunnerError::Worker(e.to_string()))?;

        // The worker blocks on this lock, so Running is on the watch channel
        // before the first emission can race it.
        state.status = RunStatus::Running;
        state.started_at = Some(Utc::now());
        self.shared.status_tx.send_replace(RunStatus::Running);
        drop(state);
        Ok(())
    }

    /// Stops the run. Valid only while running; already-emitted events stay
    /// in subscriber logs, the terminal focus and completion notification
    /// are suppressed, and once this returns no further event will ever be
    /// published for this run.
    pub fn cancel(&self) -> Result<(), RunnerError> {
        let _gate = self.shared.emission.lock().unwrap();
        let mut state = self.shared.state.lock().unwrap();
        if state.status != RunStatus::Running {
            return Err(RunnerError::InvalidState {
                expected: RunStatus::Running,
                actual: state.status,
            });
        }
        state.status = RunStatus::Cancelled;
        self.shared.cancel.cancel();
        drop(state);
        drop(_gate);
        self.shared.status_tx.send_replace(RunStatus::Cancelled);
        Ok(())
    }
}

async fn drive(
    spec: PipelineSpec,
    bus: EventBus,
    focus: Option<Arc<dyn FocusObserver>>,
    shared: Arc<RunnerShared>,
) {
    for (index, stage) in spec.stages.iter().enumerate() {
        tokio::select! {
            _ = shared.cancel.cancelled() => return,
            _ = tokio::time::sleep(Duration::from_millis(stage.delay_ms)) => {}
        }

        // Emission critical section: cancel() serializes on the gate, so
        // once it has returned this block can never publish again.
        let _gate = shared.emission.lock().unwrap();
        {
            let mut state = shared.state.lock().unwrap();
            if state.status != RunStatus::Running {
                return;
            }
            state.current_stage = Some(index);
        }

        let event = Event::from_stage(stage);
        bus.publish(&event);
        if let Some(target) = &stage.focus {
            if let Some(obs) = &focus {
                obs.focus_changed(Some(target));
            }
        }
        drop(_gate);
    }

    let _gate = shared.emission.lock().unwrap();
    {
        let state = shared.state.lock().unwrap();
        if state.status != RunStatus::Running {
            return;
        }
    }
    if let Some(terminal) = &spec.terminal_focus {
        if let Some(obs) = &focus {
            obs.focus_changed(Some(terminal));
        }
    }
    shared.state.lock().unwrap().status = RunStatus::Completed;
    drop(_gate);
    shared.status_tx.send_replace(RunStatus::Completed);
}
