use std::sync::Arc;

use tokio::sync::mpsc;

use weft_core::{ChainId, RunStatus, RunnerError};

use crate::app_core::{AppCommand, ConsoleStore, DomainEvent};
use crate::bus::EventBus;
use crate::dispatcher::{IntentDispatcher, RunHandle};
use crate::ports::{FocusObserver, IntentResolver};

/// Drives the console: commands in, domain events out through the store.
///
/// Wires the bus and the focus port into an internal channel so presentation
/// code can consume everything as [`ConsoleStore`] snapshots from a tick
/// loop.
pub struct ConsoleKernel {
    pub store: ConsoleStore,
    dispatcher: IntentDispatcher,
    bus: EventBus,
    active: Option<RunHandle>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

struct FocusForwarder {
    tx: mpsc::Sender<DomainEvent>,
}

impl FocusObserver for FocusForwarder {
    fn focus_changed(&self, focus: Option<&ChainId>) {
        if self
            .tx
            .try_send(DomainEvent::FocusShifted(focus.cloned()))
            .is_err()
        {
            tracing::warn!("domain event channel full; dropping focus change");
        }
    }
}

impl ConsoleKernel {
    pub fn new(store: ConsoleStore, resolver: Arc<dyn IntentResolver>) -> Self {
        let (tx, rx) = mpsc::channel(weft_config::EVENT_CHANNEL_CAPACITY);

        let bus = EventBus::new();
        let feed_tx = tx.clone();
        bus.subscribe(move |event| {
            if feed_tx
                .try_send(DomainEvent::StageEmitted(event.clone()))
                .is_err()
            {
                tracing::warn!("domain event channel full; dropping stage event");
            }
        });

        let focus = Arc::new(FocusForwarder { tx: tx.clone() });
        let dispatcher = IntentDispatcher::new(resolver, bus.clone(), Some(focus));

        Self {
            store,
            dispatcher,
            bus,
            active: None,
            tx,
            rx,
        }
    }

    /// Bus carrying the raw stage events, for consumers that render outside
    /// the store (the CLI's live feed printer subscribes here).
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::SubmitIntent(text) => match self.dispatcher.submit(&text) {
                Ok(handle) => {
                    self.store.apply(DomainEvent::IntentAccepted {
                        run_id: handle.run_id(),
                        intent: text.trim().to_string(),
                    });
                    self.watch_completion(&handle);
                    self.active = Some(handle);
                }
                Err(e) => self.store.apply(DomainEvent::UserError(e.to_string())),
            },

            AppCommand::CancelRun => {
                let res = match &self.active {
                    Some(handle) => handle.cancel(),
                    None => Err(RunnerError::InvalidState {
                        expected: RunStatus::Running,
                        actual: RunStatus::Idle,
                    }),
                };
                if let Err(e) = res {
                    self.store.apply(DomainEvent::UserError(e.to_string()));
                }
            }
        }
    }

    /// Drains pending domain events into the store. Completion notices from
    /// superseded runs are dropped.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            if let DomainEvent::RunFinished { run_id, .. } = &ev {
                let current = self.store.state().active_run;
                if current != Some(*run_id) {
                    continue;
                }
            }
            self.store.apply(ev);
        }
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }

    fn watch_completion(&self, handle: &RunHandle) {
        let tx = self.tx.clone();
        let run_id = handle.run_id();
        let mut status_rx = handle.watch_status();

        let spawn_res = std::thread::Builder::new()
            .name("weft-run-watch".into())
            .spawn(move || {
                let rt = match crate::async_runtime::runtime() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = tx.blocking_send(DomainEvent::UserError(format!(
                            "Failed to start async runtime: {e}"
                        )));
                        return;
                    }
                };

                rt.block_on(async move {
                    loop {
                        let status = *status_rx.borrow_and_update();
                        if status.is_terminal() {
                            let _ = tx.send(DomainEvent::RunFinished { run_id, status }).await;
                            return;
                        }
                        if status_rx.changed().await.is_err() {
                            return;
                        }
                    }
                });
            });

        if let Err(e) = spawn_res {
            let _ = self.tx.try_send(DomainEvent::UserError(format!(
                "Failed to start completion watcher thread: {e}"
            )));
        }
    }
}
