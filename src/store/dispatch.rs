//! The store: single owner of a slice's state.
//!
//! The store is an explicitly constructed handle, cheap to clone (all clones
//! share one state cell). State changes are committed one at a time under a
//! lock and queued for delivery in commit order. Subscribers run outside the
//! lock, on whichever thread is currently draining the queue, so every
//! subscriber sees every committed state in the order it was committed.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::middleware::{Handled, Middleware};
use super::reducer::Reducer;
use super::thunk::Thunk;

/// Something that can be handed to [`Store::dispatch`].
pub enum Dispatch<R: Reducer> {
    /// A plain action, reduced synchronously.
    Action(R::Intent),
    /// A deferred unit, executed by [`ThunkMiddleware`](super::ThunkMiddleware).
    Thunk(Box<dyn Thunk<R>>),
}

impl<R: Reducer> Dispatch<R> {
    pub fn action(intent: R::Intent) -> Self {
        Self::Action(intent)
    }

    pub fn thunk(thunk: impl Thunk<R>) -> Self {
        Self::Thunk(Box::new(thunk))
    }
}

impl<R: Reducer> std::fmt::Debug for Dispatch<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dispatch::Action(intent) => f.debug_tuple("Action").field(intent).finish(),
            Dispatch::Thunk(_) => f.write_str("Thunk(..)"),
        }
    }
}

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

struct Listeners<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Listener<S>)>>,
}

trait Unsubscribe: Send + Sync {
    fn remove(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<S: Send + Sync + 'static> Unsubscribe for Listeners<S> {
    fn remove(&self, id: u64) {
        self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.entries.lock().iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// Registration handle returned by [`Store::subscribe`].
///
/// The listener stays registered for as long as this value lives.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Unsubscribe>,
}

impl Subscription {
    /// Unregister the listener now.
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the listener is still registered with a live store.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

/// Committed states waiting to be delivered to listeners.
struct Pending<S> {
    queue: VecDeque<S>,
    draining: bool,
}

/// Releases the drainer role when a listener panics mid-drain.
struct DrainGuard<'a, S> {
    pending: &'a Mutex<Pending<S>>,
}

impl<S> Drop for DrainGuard<'_, S> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.pending.lock().draining = false;
        }
    }
}

struct StoreInner<R: Reducer> {
    state: Mutex<R::State>,
    pending: Mutex<Pending<R::State>>,
    listeners: Arc<Listeners<R::State>>,
    middleware: Vec<Arc<dyn Middleware<R>>>,
}

/// Single mutable cell holding a slice's state.
///
/// Only the reducer `R` ever produces new state. Readers get snapshots.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Create a store with no middleware. Deferred units are ignored.
    pub fn new(initial: R::State) -> Self {
        Self::with_middleware(initial, Vec::new())
    }

    /// Create a store whose dispatch runs through `middleware` in order.
    pub fn with_middleware(initial: R::State, middleware: Vec<Arc<dyn Middleware<R>>>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(initial),
                pending: Mutex::new(Pending {
                    queue: VecDeque::new(),
                    draining: false,
                }),
                listeners: Arc::new(Listeners {
                    next_id: AtomicU64::new(0),
                    entries: Mutex::new(Vec::new()),
                }),
                middleware,
            }),
        }
    }

    /// Dispatch a plain action or a deferred unit.
    ///
    /// Returns the spawned task when a middleware started one. Never fails:
    /// a deferred unit that no middleware consumes is logged and dropped.
    pub fn dispatch(&self, item: impl Into<Dispatch<R>>) -> Option<JoinHandle<()>> {
        let mut item = item.into();
        for middleware in &self.inner.middleware {
            match middleware.handle(self, item) {
                Handled::Next(next) => item = next,
                Handled::Consumed(task) => return task,
            }
        }

        match item {
            Dispatch::Action(intent) => {
                self.commit(intent);
            }
            Dispatch::Thunk(_) => {
                tracing::warn!("deferred unit reached the reducer without thunk middleware, ignoring");
            }
        }
        None
    }

    fn commit(&self, intent: R::Intent) {
        {
            let mut state = self.inner.state.lock();
            let next = R::reduce(state.clone(), intent);
            if next == *state {
                tracing::trace!("state unchanged, skipping notify");
                return;
            }
            *state = next.clone();
            // Enqueue under the state lock so queue order is commit order.
            self.inner.pending.lock().queue.push_back(next);
        }
        self.drain();
    }

    /// Deliver queued states in order.
    ///
    /// Only one caller drains at a time. A commit made while another thread
    /// (or a listener on this thread) is draining is delivered by that
    /// drainer, after everything committed before it.
    fn drain(&self) {
        {
            let mut pending = self.inner.pending.lock();
            if pending.draining {
                return;
            }
            pending.draining = true;
        }
        let _guard = DrainGuard {
            pending: &self.inner.pending,
        };

        loop {
            let next = {
                let mut pending = self.inner.pending.lock();
                match pending.queue.pop_front() {
                    Some(next) => next,
                    // Checked and released under one lock so no commit is stranded.
                    None => {
                        pending.draining = false;
                        return;
                    }
                }
            };
            self.notify(&next);
        }
    }

    fn notify(&self, state: &R::State) {
        // Copy out so listeners can subscribe or dispatch re-entrantly.
        let listeners: Vec<Listener<R::State>> = self
            .inner
            .listeners
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    /// Snapshot of the current state.
    pub fn get_state(&self) -> R::State {
        self.inner.state.lock().clone()
    }

    /// Project a value out of the current state without cloning all of it.
    pub fn select<T>(&self, selector: impl FnOnce(&R::State) -> T) -> T {
        selector(&self.inner.state.lock())
    }

    /// Register `listener` to run after every committed state change.
    pub fn subscribe(&self, listener: impl Fn(&R::State) + Send + Sync + 'static) -> Subscription {
        let listeners = &self.inner.listeners;
        let id = listeners.next_id.fetch_add(1, Ordering::Relaxed);
        listeners.entries.lock().push((id, Arc::new(listener)));

        let registry: Weak<dyn Unsubscribe> = Arc::downgrade(listeners) as Weak<dyn Unsubscribe>;
        Subscription { id, registry }
    }

    /// Number of registered listeners.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.entries.lock().len()
    }
}
