//! Base trait for UI state in MVI architecture.

/// Marker trait for UI state objects.
///
/// States are cloned to create new states, compared to detect changes,
/// and carry everything needed to render their part of the view.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
