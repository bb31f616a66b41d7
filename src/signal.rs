use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use log::error;
use serde::Serialize;

use crate::models::ResourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
    Reordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Whole-collection writes, delivered to every document on the origin.
    Coarse,
    /// Single-record changes, delivered only inside the writing document.
    Fine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    Collection {
        kind: ResourceKind,
    },
    Record {
        kind: ResourceKind,
        action: ChangeAction,
        id: String,
    },
}

impl ChangeEvent {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ChangeEvent::Collection { kind } | ChangeEvent::Record { kind, .. } => *kind,
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            ChangeEvent::Collection { .. } => Channel::Coarse,
            ChangeEvent::Record { .. } => Channel::Fine,
        }
    }
}

pub type Handler = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Listener {
    id: u64,
    channel: Channel,
    handler: Handler,
}

/// Per-document broadcast of store changes.
///
/// Handlers are invoked synchronously on the emitting thread, exactly once per
/// emission, in subscription order. Nothing is queued: a handler registered
/// after an emission never sees it. A panicking handler is logged and skipped;
/// the rest still run.
#[derive(Default)]
pub struct ChangeSignal {
    next_id: AtomicU64,
    listeners: Mutex<Vec<Listener>>,
}

impl ChangeSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe<F>(self: &Arc<Self>, channel: Channel, handler: F) -> Subscription
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push(Listener {
                id,
                channel,
                handler: Arc::new(handler),
            });
        }
        Subscription {
            id,
            signal: Arc::downgrade(self),
        }
    }

    pub fn emit(&self, event: &ChangeEvent) {
        // Snapshot so handlers can re-enter (read, subscribe, unsubscribe).
        let handlers: Vec<Handler> = match self.listeners.lock() {
            Ok(listeners) => listeners
                .iter()
                .filter(|l| l.channel == event.channel())
                .map(|l| l.handler.clone())
                .collect(),
            Err(_) => return,
        };

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                error!("change handler panicked while handling {:?}", event);
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }

    fn remove(&self, id: u64) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|l| l.id != id);
        }
    }
}

/// Handle returned by `ChangeSignal::subscribe`. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    signal: Weak<ChangeSignal>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.remove(self.id);
        }
    }
}
