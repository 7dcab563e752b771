use std::sync::{Arc, Mutex};

use crate::domain::ConsoleState;

use super::{events::DomainEvent, reducer::reduce};

#[derive(Clone, Default)]
pub struct ConsoleStore {
    inner: Arc<Mutex<ConsoleState>>,
}

impl ConsoleStore {
    pub fn new(state: ConsoleState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn state(&self) -> ConsoleState {
        self.inner.lock().unwrap().clone()
    }

    pub fn apply(&self, ev: DomainEvent) {
        let mut guard = self.inner.lock().unwrap();
        let next = reduce(guard.clone(), ev);
        *guard = next;
    }
}
