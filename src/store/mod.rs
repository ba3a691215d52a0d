//! Unidirectional state store primitives.
//!
//! This module provides the base traits and the store that drive every
//! state slice in the crate.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────── Middleware ────────────┐
//! dispatch ──┤ Thunk ──→ side effect ──→ dispatch │──→ Reducer ──→ State ──→ Subscribers
//!            └────────────────────────────────────┘
//! ```
//!
//! - **State**: Snapshot of a slice, handed out by clone
//! - **Intent**: Actions describing what happened
//! - **Reducer**: Pure function that transforms state based on actions
//! - **Middleware**: Extends dispatch, e.g. to run deferred units (thunks)

mod dispatch;
mod intent;
mod middleware;
mod reducer;
mod state;
mod thunk;

pub use dispatch::{Dispatch, Store, Subscription};
pub use intent::Intent;
pub use middleware::{Handled, LoggingMiddleware, Middleware, ThunkMiddleware};
pub use reducer::Reducer;
pub use state::SliceState;
pub use thunk::{BoxFuture, Thunk};
