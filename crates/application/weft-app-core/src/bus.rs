use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use weft_core::Event;

/// Handle returned by [`EventBus::subscribe`]; pass back to `unsubscribe`.
pub type SubscriptionId = u64;

type Observer = Arc<dyn Fn(&Event) + Send + Sync>;

/// In-process fan-out of emitted events to presentation observers.
///
/// Delivery is synchronous and in subscription order. There is no buffering:
/// an observer only sees events published while it is subscribed, and a
/// subscription added during an in-flight `publish` does not receive that
/// event. Consumers that need history append received events to their own
/// log (the console store does).
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .observers
            .lock()
            .unwrap()
            .push((id, Arc::new(observer)));
        id
    }

    /// Removes a subscription. Returns false when the id is unknown (already
    /// removed or never issued).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.lock().unwrap();
        let before = observers.len();
        observers.retain(|(sub_id, _)| *sub_id != id);
        observers.len() != before
    }

    /// Delivers `event` to every observer subscribed when the call starts.
    ///
    /// A panicking observer is reported and skipped; delivery continues with
    /// the remaining observers. Observers must not cancel the publishing run
    /// from inside the callback.
    pub fn publish(&self, event: &Event) {
        let snapshot: Vec<(SubscriptionId, Observer)> =
            self.inner.observers.lock().unwrap().clone();
        for (id, observer) in snapshot {
            if catch_unwind(AssertUnwindSafe(|| observer(event))).is_err() {
                tracing::warn!(subscription = id, "event observer panicked; skipping");
            }
        }
    }
}
