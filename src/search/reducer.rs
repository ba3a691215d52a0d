//! Reducer for the package search slice.

use crate::store::Reducer;

use super::action::SearchAction;
use super::state::SearchState;

/// Reducer for search lifecycle transitions.
///
/// Every recognized action replaces all three fields at once; the previous
/// `data` and `error` never leak into the next state.
pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchAction;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchAction::Requested => SearchState {
                loading: true,
                error: None,
                data: Vec::new(),
            },
            SearchAction::Succeeded { results } => SearchState {
                loading: false,
                error: None,
                data: results,
            },
            SearchAction::Failed { message } => SearchState {
                loading: false,
                error: Some(message),
                data: Vec::new(),
            },
            SearchAction::Unrecognized => state,
        }
    }
}
