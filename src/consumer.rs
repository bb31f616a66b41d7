use std::sync::{Arc, Mutex, RwLock};

use log::debug;

use crate::models::ResourceKind;
use crate::repository::{CollectionRepository, Resource, Singleton, SingletonRepository};
use crate::signal::{Channel, ChangeSignal, Subscription};

/// Anything a consumer can load and watch.
pub trait Source: Clone + Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    fn kind(&self) -> ResourceKind;
    fn load(&self) -> Self::Output;
    fn signal(&self) -> Arc<ChangeSignal>;
}

impl<T: Resource> Source for CollectionRepository<T> {
    type Output = Vec<T>;

    fn kind(&self) -> ResourceKind {
        T::KIND
    }

    fn load(&self) -> Vec<T> {
        self.read_all()
    }

    fn signal(&self) -> Arc<ChangeSignal> {
        self.document().signal().clone()
    }
}

impl<T: Singleton> Source for SingletonRepository<T> {
    type Output = T;

    fn kind(&self) -> ResourceKind {
        T::KIND
    }

    fn load(&self) -> T {
        self.read()
    }

    fn signal(&self) -> Arc<ChangeSignal> {
        self.document().signal().clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unmounted,
    Loading,
    Ready,
}

struct State<V> {
    phase: Phase,
    value: Option<V>,
    loads: u64,
}

/// Display-side holder of one resource: reads at mount, re-reads on every
/// matching change signal, stops listening at unmount.
pub struct ResourceConsumer<S: Source> {
    source: S,
    fine_grained: bool,
    state: Arc<RwLock<State<S::Output>>>,
    /// Held across load and store so overlapping reloads land in order.
    reloading: Arc<Mutex<()>>,
    subscriptions: Vec<Subscription>,
}

impl<S: Source> ResourceConsumer<S> {
    pub fn new(source: S) -> Self {
        ResourceConsumer {
            source,
            fine_grained: false,
            state: Arc::new(RwLock::new(State {
                phase: Phase::Unmounted,
                value: None,
                loads: 0,
            })),
            reloading: Arc::new(Mutex::new(())),
            subscriptions: Vec::new(),
        }
    }

    /// Also refresh on record-level events from the same document.
    pub fn with_fine_grained(mut self) -> Self {
        self.fine_grained = true;
        self
    }

    pub fn mount(&mut self) {
        if self.phase() != Phase::Unmounted {
            return;
        }
        set_phase(&self.state, Phase::Loading);
        reload(&self.source, &self.state, &self.reloading);

        let signal = self.source.signal();
        let kind = self.source.kind();
        let mut channels = vec![Channel::Coarse];
        if self.fine_grained {
            channels.push(Channel::Fine);
        }
        for channel in channels {
            let source = self.source.clone();
            let state = self.state.clone();
            let reloading = self.reloading.clone();
            self.subscriptions.push(signal.subscribe(channel, move |event| {
                if event.kind() == kind {
                    reload(&source, &state, &reloading);
                }
            }));
        }
        debug!("consumer of '{}' mounted", kind.key());
    }

    pub fn unmount(&mut self) {
        self.subscriptions.clear();
        set_phase(&self.state, Phase::Unmounted);
    }

    pub fn phase(&self) -> Phase {
        self.state.read().map(|s| s.phase).unwrap_or(Phase::Unmounted)
    }

    /// Current value; `None` before the first mount.
    pub fn value(&self) -> Option<S::Output> {
        self.state.read().ok().and_then(|s| s.value.clone())
    }

    /// How many times the value was (re)loaded, one per render.
    pub fn load_count(&self) -> u64 {
        self.state.read().map(|s| s.loads).unwrap_or(0)
    }
}

impl<S: Source> Drop for ResourceConsumer<S> {
    fn drop(&mut self) {
        self.subscriptions.clear();
    }
}

fn set_phase<V>(state: &RwLock<State<V>>, phase: Phase) {
    if let Ok(mut s) = state.write() {
        s.phase = phase;
    }
}

fn reload<S: Source>(source: &S, state: &RwLock<State<S::Output>>, reloading: &Mutex<()>) {
    // A later signal waits here, so its load always sees the newer write.
    let _guard = match reloading.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    // Load outside the state lock; a reader may be mid-render.
    let value = source.load();
    if let Ok(mut s) = state.write() {
        if s.phase == Phase::Unmounted {
            return;
        }
        s.value = Some(value);
        s.loads += 1;
        s.phase = Phase::Ready;
    }
}
