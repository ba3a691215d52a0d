//! Dispatch pipeline extensions.
//!
//! Every item handed to [`Store::dispatch`] passes through the store's
//! middleware in installation order. A middleware either forwards the item
//! to the next stage or consumes it. Plain actions that survive the whole
//! chain are reduced and committed.

use tokio::task::JoinHandle;

use super::dispatch::{Dispatch, Store};
use super::reducer::Reducer;

/// Outcome of a single middleware stage.
pub enum Handled<R: Reducer> {
    /// Pass the item to the next middleware, or to the reducer at the end.
    Next(Dispatch<R>),
    /// The item was consumed. A spawned task, if any, goes back to the caller.
    Consumed(Option<JoinHandle<()>>),
}

/// A stage in the dispatch pipeline.
pub trait Middleware<R: Reducer>: Send + Sync + 'static {
    fn handle(&self, store: &Store<R>, item: Dispatch<R>) -> Handled<R>;
}

/// Executes deferred units ([`Dispatch::Thunk`]).
///
/// The unit's synchronous prologue runs inside `dispatch`; its continuation
/// is spawned on the current tokio runtime and cannot be cancelled through
/// the store. Without a runtime the unit is dropped before it runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThunkMiddleware;

impl<R: Reducer> Middleware<R> for ThunkMiddleware {
    fn handle(&self, store: &Store<R>, item: Dispatch<R>) -> Handled<R> {
        let thunk = match item {
            Dispatch::Thunk(thunk) => thunk,
            action @ Dispatch::Action(_) => return Handled::Next(action),
        };

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!(error = %err, "no async runtime, dropping deferred unit");
                return Handled::Consumed(None);
            }
        };

        let continuation = thunk.run(store.clone());
        Handled::Consumed(Some(runtime.spawn(continuation)))
    }
}

/// Logs every dispatched item at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingMiddleware;

impl<R: Reducer> Middleware<R> for LoggingMiddleware {
    fn handle(&self, _store: &Store<R>, item: Dispatch<R>) -> Handled<R> {
        match &item {
            Dispatch::Action(intent) => tracing::debug!(action = ?intent, "dispatch"),
            Dispatch::Thunk(_) => tracing::debug!("dispatch deferred unit"),
        }
        Handled::Next(item)
    }
}
