//! Package search feature module.
//!
//! Tracks the loading/success/error lifecycle of registry searches.
//!
//! # Architecture
//!
//! - `action.rs` - Lifecycle events (Requested, Succeeded, Failed)
//! - `state.rs` - Slice state (`loading`, `error`, `data`)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `thunk.rs` - Deferred unit performing the lookup

mod action;
mod reducer;
mod state;
mod thunk;

use std::sync::Arc;

pub use action::SearchAction;
pub use reducer::SearchReducer;
pub use state::SearchState;
pub use thunk::{search_packages, SearchPackages};

use crate::store::{LoggingMiddleware, Middleware, Store, ThunkMiddleware};

/// Store for the search slice with logging and thunk middleware installed.
pub fn create_store() -> Store<SearchReducer> {
    let middleware: Vec<Arc<dyn Middleware<SearchReducer>>> =
        vec![Arc::new(LoggingMiddleware), Arc::new(ThunkMiddleware)];
    Store::with_middleware(SearchState::new(), middleware)
}
