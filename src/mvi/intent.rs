//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (key presses, form input)
/// - API outcomes (fulfilled or rejected requests)
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
