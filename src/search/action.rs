//! Actions for the package search slice.

use serde::{Deserialize, Serialize};

use crate::store::{Dispatch, Intent};

use super::reducer::SearchReducer;

/// Lifecycle events of a package search.
///
/// Serialized as internally tagged JSON, e.g.
/// `{"type":"SEARCH_SUCCEEDED","results":["lodash"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SearchAction {
    /// A new search has begun.
    #[serde(rename = "SEARCH_REQUESTED")]
    Requested,

    /// The registry answered.
    #[serde(rename = "SEARCH_SUCCEEDED")]
    Succeeded {
        /// Matching package names, in registry order.
        results: Vec<String>,
    },

    /// The lookup failed.
    #[serde(rename = "SEARCH_FAILED")]
    Failed {
        /// Human-readable failure description.
        message: String,
    },

    /// A tag this slice does not own. Reduced as identity.
    #[serde(rename = "UNRECOGNIZED", other)]
    Unrecognized,
}

impl SearchAction {
    pub fn requested() -> Self {
        Self::Requested
    }

    pub fn succeeded(results: Vec<String>) -> Self {
        Self::Succeeded { results }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

impl Intent for SearchAction {}

impl From<SearchAction> for Dispatch<SearchReducer> {
    fn from(action: SearchAction) -> Self {
        Dispatch::Action(action)
    }
}
