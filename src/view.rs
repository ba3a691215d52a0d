//! Plain-text rendering of the search state.

use crate::search::SearchState;

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No packages found";

/// Render `state` the way the search screen shows it.
///
/// Loading wins over everything else; an error hides the result list.
pub fn render(state: &SearchState) -> String {
    if state.loading() {
        return LOADING_TEXT.to_string();
    }
    if let Some(error) = state.error() {
        return error.to_string();
    }
    if state.data().is_empty() {
        return EMPTY_TEXT.to_string();
    }
    state.data().join("\n")
}
