use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use log::debug;

use crate::models::ResourceKind;
use crate::signal::{ChangeEvent, ChangeSignal};
use crate::store::KeyedRecordStore;

/// One storage origin: the shared keyed store plus every document attached to
/// it. Built once at startup and passed to whatever needs it.
pub struct Origin {
    store: Arc<dyn KeyedRecordStore>,
    documents: Mutex<Vec<(u64, Weak<ChangeSignal>)>>,
    next_document: AtomicU64,
}

impl Origin {
    pub fn new(store: Arc<dyn KeyedRecordStore>) -> Arc<Self> {
        Arc::new(Origin {
            store,
            documents: Mutex::new(Vec::new()),
            next_document: AtomicU64::new(1),
        })
    }

    /// Attach a new document (a tab, or the server's own view) with its own
    /// change signal.
    pub fn open_document(self: &Arc<Self>) -> Document {
        let id = self.next_document.fetch_add(1, Ordering::SeqCst);
        let signal = ChangeSignal::new();
        if let Ok(mut docs) = self.documents.lock() {
            docs.retain(|(_, s)| s.strong_count() > 0);
            docs.push((id, Arc::downgrade(&signal)));
        }
        debug!("document {} opened", id);
        Document {
            id,
            origin: self.clone(),
            signal,
        }
    }

    pub fn document_count(&self) -> usize {
        self.documents
            .lock()
            .map(|docs| docs.iter().filter(|(_, s)| s.strong_count() > 0).count())
            .unwrap_or(0)
    }

    /// Storage-event delivery: every live document except the writer hears
    /// about a collection write.
    fn broadcast_from(&self, writer: u64, kind: ResourceKind) {
        let targets: Vec<Arc<ChangeSignal>> = match self.documents.lock() {
            Ok(docs) => docs
                .iter()
                .filter(|(id, _)| *id != writer)
                .filter_map(|(_, s)| s.upgrade())
                .collect(),
            Err(_) => return,
        };
        let event = ChangeEvent::Collection { kind };
        for signal in targets {
            signal.emit(&event);
        }
    }
}

/// A view onto an origin with its own listeners. Cheap to clone; clones share
/// the same signal.
#[derive(Clone)]
pub struct Document {
    id: u64,
    origin: Arc<Origin>,
    signal: Arc<ChangeSignal>,
}

impl Document {
    pub fn store(&self) -> &dyn KeyedRecordStore {
        self.origin.store.as_ref()
    }

    pub fn signal(&self) -> &Arc<ChangeSignal> {
        &self.signal
    }

    /// Announce a collection write: other documents via the origin, this one
    /// by self-dispatch.
    pub fn notify_collection(&self, kind: ResourceKind) {
        self.origin.broadcast_from(self.id, kind);
        self.signal.emit(&ChangeEvent::Collection { kind });
    }

    /// Announce a record-level change to this document only.
    pub fn notify_record(&self, event: ChangeEvent) {
        self.signal.emit(&event);
    }
}
