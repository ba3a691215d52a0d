//! State for the package search slice.

use serde::Serialize;

use crate::store::SliceState;

/// Loading/success/error lifecycle of the most recently committed search.
///
/// Fields are private to the `search` module: only [`SearchReducer`]
/// produces new values. At most one of `loading` and `error` is set, and
/// `data` is empty whenever either is.
///
/// [`SearchReducer`]: super::SearchReducer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchState {
    pub(super) loading: bool,
    pub(super) error: Option<String>,
    pub(super) data: Vec<String>,
}

impl SliceState for SearchState {}

impl SearchState {
    /// Initial state: idle, no error, no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Description of the last failure, if the last search failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Package names from the last successful search, in registry order.
    pub fn data(&self) -> &[String] {
        &self.data
    }
}
