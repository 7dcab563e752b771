use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use weft_app_core::ports::IntentResolver;
use weft_app_core::{EventBus, IntentDispatcher, RunHandle};
use weft_core::{EventKind, PipelineSpec, RunStatus, RunnerError, StageDefinition, SubmitError};

struct FixedResolver {
    spec: PipelineSpec,
}

impl IntentResolver for FixedResolver {
    fn resolve(&self, _intent: &str) -> anyhow::Result<PipelineSpec> {
        Ok(self.spec.clone())
    }
}

struct FailingResolver;

impl IntentResolver for FailingResolver {
    fn resolve(&self, intent: &str) -> anyhow::Result<PipelineSpec> {
        anyhow::bail!("no route for intent '{intent}'")
    }
}

fn stage(delay_ms: u64) -> StageDefinition {
    StageDefinition {
        delay_ms,
        source: "ORCHESTRATOR".to_string(),
        message: "working".to_string(),
        kind: EventKind::Info,
        detail: None,
        focus: None,
    }
}

fn spec(delays: &[u64]) -> PipelineSpec {
    PipelineSpec {
        stages: delays.iter().copied().map(stage).collect(),
        terminal_focus: None,
    }
}

fn wait_terminal(handle: &RunHandle) -> RunStatus {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        let status = handle.status();
        if status.is_terminal() {
            return status;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("run did not reach a terminal status");
}

#[test]
fn submission_while_running_is_rejected_as_busy() {
    let bus = EventBus::new();
    let count: Arc<Mutex<usize>> = Arc::default();
    let sink = count.clone();
    bus.subscribe(move |_| *sink.lock().unwrap() += 1);

    let dispatcher = IntentDispatcher::new(
        Arc::new(FixedResolver {
            spec: spec(&[0, 5000]),
        }),
        bus,
        None,
    );

    let handle = dispatcher.submit("first").expect("first submit");
    let deadline = Instant::now() + Duration::from_secs(5);
    while *count.lock().unwrap() < 1 {
        assert!(Instant::now() < deadline, "stage 0 never fired");
        std::thread::sleep(Duration::from_millis(5));
    }

    assert!(matches!(
        dispatcher.submit("second"),
        Err(SubmitError::Busy)
    ));

    // The in-flight run and its log are untouched by the rejection.
    assert_eq!(handle.status(), RunStatus::Running);
    assert_eq!(*count.lock().unwrap(), 1);
    assert_eq!(
        dispatcher.active_run().map(|h| h.run_id()),
        Some(handle.run_id())
    );

    handle.cancel().expect("cancel");
}

#[test]
fn finished_run_frees_the_dispatcher() {
    let dispatcher = IntentDispatcher::new(
        Arc::new(FixedResolver { spec: spec(&[0]) }),
        EventBus::new(),
        None,
    );

    let first = dispatcher.submit("first").expect("first submit");
    assert_eq!(wait_terminal(&first), RunStatus::Completed);

    let second = dispatcher.submit("second").expect("second submit");
    assert_ne!(first.run_id(), second.run_id());
    assert_eq!(wait_terminal(&second), RunStatus::Completed);
}

#[test]
fn cancelled_run_frees_the_dispatcher() {
    let dispatcher = IntentDispatcher::new(
        Arc::new(FixedResolver {
            spec: spec(&[0, 5000]),
        }),
        EventBus::new(),
        None,
    );

    let first = dispatcher.submit("first").expect("first submit");
    first.cancel().expect("cancel");
    assert_eq!(first.status(), RunStatus::Cancelled);

    dispatcher.submit("second").expect("second submit after cancel");
}

#[test]
fn resolver_failure_surfaces_without_a_run() {
    let dispatcher = IntentDispatcher::new(Arc::new(FailingResolver), EventBus::new(), None);

    match dispatcher.submit("deploy a dao") {
        Err(SubmitError::Resolve(e)) => assert!(e.to_string().contains("no route")),
        Err(other) => panic!("expected Resolve error, got {other:?}"),
        Ok(_) => panic!("expected Resolve error, got a run handle"),
    }
    assert!(dispatcher.active_run().is_none());
}

#[test]
fn empty_resolved_spec_is_rejected() {
    let dispatcher = IntentDispatcher::new(
        Arc::new(FixedResolver {
            spec: PipelineSpec::default(),
        }),
        EventBus::new(),
        None,
    );

    assert!(matches!(
        dispatcher.submit("deploy a dao"),
        Err(SubmitError::Runner(RunnerError::InvalidSpec))
    ));
    assert!(dispatcher.active_run().is_none());
}
