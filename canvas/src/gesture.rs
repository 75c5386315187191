//! Page pan/pinch gesture control.
//!
//! The zoom/pan recognizer lives outside this crate. The engine only switches
//! it off for the duration of a stroke so a finger drag draws instead of
//! panning the page.

/// Enables and disables the page's pan and pinch gestures.
pub trait GestureCoordinator {
    fn set_pan_enabled(&mut self, enabled: bool);
    fn set_pinch_enabled(&mut self, enabled: bool);
}

/// Coordinator for hosts without a gesture recognizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGestures;

impl GestureCoordinator for NoGestures {
    fn set_pan_enabled(&mut self, _enabled: bool) {}
    fn set_pinch_enabled(&mut self, _enabled: bool) {}
}
