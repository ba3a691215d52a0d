//! Base trait for actions dispatched to a store.

/// Marker trait for action objects.
///
/// Actions describe something that happened:
/// - A user asked for something (a search was submitted)
/// - A side effect finished (a lookup resolved or failed)
///
/// Actions are consumed by reducers to produce new states.
pub trait Intent: std::fmt::Debug + Send + 'static {}
