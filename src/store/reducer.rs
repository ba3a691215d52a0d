//! Reducer trait for the store.

use super::intent::Intent;
use super::state::SliceState;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer: 'static {
    /// The state type this reducer operates on.
    type State: SliceState;

    /// The action type this reducer handles.
    type Intent: Intent;

    /// Process an action and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
