//! Event Log - Observable stream of lifecycle events.
//!
//! The log is a shared handle: the host registry and the mount manager each
//! hold a clone and append to the same stream. Everything runs on one
//! thread, so the handle is `Rc<RefCell<..>>`.
//!
//! Every recorded event is also emitted through `tracing`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::{EventKind, LifecycleEvent};

#[derive(Debug)]
struct LogState {
    filter: EventKind,
    events: Vec<LifecycleEvent>,
}

/// Shared, filterable record of [`LifecycleEvent`]s.
#[derive(Debug, Clone)]
pub struct EventLog {
    inner: Rc<RefCell<LogState>>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Log recording every event kind.
    pub fn new() -> Self {
        Self::with_filter(EventKind::ALL)
    }

    /// Log recording only the kinds in `filter`.
    pub fn with_filter(filter: EventKind) -> Self {
        Self {
            inner: Rc::new(RefCell::new(LogState {
                filter,
                events: Vec::new(),
            })),
        }
    }

    pub fn filter(&self) -> EventKind {
        self.inner.borrow().filter
    }

    /// Append an event. Events outside the filter are traced but not stored.
    pub fn record(&self, event: LifecycleEvent) {
        match &event {
            LifecycleEvent::NodeDestroyed { node, owner } => {
                tracing::info!(%node, owner = %owner, "{event}");
            }
            LifecycleEvent::HostDestroyed { host } => {
                tracing::info!(host = %host, "{event}");
            }
            _ => tracing::debug!("{event}"),
        }

        let mut state = self.inner.borrow_mut();
        if state.filter.contains(event.kind()) {
            state.events.push(event);
        }
    }

    /// Snapshot of recorded events, oldest first.
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.inner.borrow().events.clone()
    }

    /// Only the node destruction events.
    pub fn destroyed_events(&self) -> Vec<LifecycleEvent> {
        self.inner
            .borrow()
            .events
            .iter()
            .filter(|event| event.kind() == EventKind::NODE_DESTROYED)
            .cloned()
            .collect()
    }

    /// Take all recorded events, leaving the log empty.
    pub fn drain(&self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.inner.borrow_mut().events)
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().events.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().events.is_empty()
    }
}
