//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (key presses on a screen)
/// - System events (API results, decoder callbacks, timers)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
