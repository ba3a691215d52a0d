//! Deferred search unit.

use std::sync::Arc;

use crate::registry::PackageLookup;
use crate::store::{BoxFuture, Dispatch, Store, Thunk};

use super::action::SearchAction;
use super::reducer::SearchReducer;

/// Searches the registry for one term and reports the lifecycle to the store.
///
/// `SearchRequested` is committed synchronously while the unit is being
/// dispatched; exactly one of `SearchSucceeded`/`SearchFailed` follows once
/// the lookup settles. Concurrent units are not sequenced against each
/// other: whichever lookup settles last determines the final state.
pub struct SearchPackages {
    term: String,
    lookup: Arc<dyn PackageLookup>,
}

impl SearchPackages {
    pub fn new(lookup: Arc<dyn PackageLookup>, term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            lookup,
        }
    }
}

impl Thunk<SearchReducer> for SearchPackages {
    fn run(self: Box<Self>, store: Store<SearchReducer>) -> BoxFuture<'static, ()> {
        store.dispatch(SearchAction::requested());

        Box::pin(async move {
            let outcome = self.lookup.lookup(&self.term).await;
            let action = match outcome {
                Ok(packages) => {
                    tracing::debug!(term = %self.term, count = packages.len(), "search succeeded");
                    SearchAction::succeeded(packages.into_iter().map(|p| p.name).collect())
                }
                Err(err) => {
                    tracing::debug!(term = %self.term, error = %err, "search failed");
                    SearchAction::failed(err.to_string())
                }
            };
            store.dispatch(action);
        })
    }
}

/// Dispatchable unit that searches for `term` through `lookup`.
pub fn search_packages(
    lookup: Arc<dyn PackageLookup>,
    term: impl Into<String>,
) -> Dispatch<SearchReducer> {
    Dispatch::thunk(SearchPackages::new(lookup, term))
}
