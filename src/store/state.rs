//! Base trait for state held by a store.

/// Marker trait for slice state.
///
/// States should be:
/// - Immutable from the outside (Clone to hand out snapshots)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for skipping no-op commits)
pub trait SliceState: Clone + PartialEq + Default + Send + Sync + 'static {}
