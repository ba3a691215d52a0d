//! Deferred units of work dispatched through the store.

use std::future::Future;
use std::pin::Pin;

use super::dispatch::Store;
use super::reducer::Reducer;

/// Boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A deferred side effect that dispatches actions over time.
///
/// [`ThunkMiddleware`](super::ThunkMiddleware) calls `run` synchronously from
/// inside [`Store::dispatch`], so anything `run` does before handing back its
/// future is committed before `dispatch` returns. The future is then spawned
/// on the current tokio runtime.
pub trait Thunk<R: Reducer>: Send + 'static {
    /// Run the synchronous prologue and return the asynchronous continuation.
    fn run(self: Box<Self>, store: Store<R>) -> BoxFuture<'static, ()>;
}

impl<R, F, Fut> Thunk<R> for F
where
    R: Reducer,
    F: FnOnce(Store<R>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn run(self: Box<Self>, store: Store<R>) -> BoxFuture<'static, ()> {
        Box::pin((*self)(store))
    }
}
