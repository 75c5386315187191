//! DOM pointer events bound on the drawing surface, and their conversion
//! into engine input.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use canvas::input::PointerInput;
use canvas::mapper::Point;
use web_sys::{MouseEvent, TouchEvent, TouchList};

/// What a surface event means to the stroke machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Down,
    Move,
    Up,
    /// The pointer left the surface; commit where it left.
    Leave,
}

/// Every event type bound on the surface, with its meaning and whether it is a touch event.
pub const SURFACE_EVENTS: &[(&str, SurfaceEvent, bool)] = &[
    ("mousedown", SurfaceEvent::Down, false),
    ("mousemove", SurfaceEvent::Move, false),
    ("mouseup", SurfaceEvent::Up, false),
    ("mouseleave", SurfaceEvent::Leave, false),
    ("touchstart", SurfaceEvent::Down, true),
    ("touchmove", SurfaceEvent::Move, true),
    ("touchend", SurfaceEvent::Up, true),
    ("touchcancel", SurfaceEvent::Up, true),
];

/// Whether `event_type` is a touch event (bound non-passive).
#[must_use]
pub fn is_touch_type(event_type: &str) -> bool {
    SURFACE_EVENTS.iter().any(|(name, _, touch)| *name == event_type && *touch)
}

#[must_use]
pub fn mouse_input(ev: &MouseEvent) -> PointerInput {
    PointerInput::mouse(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

#[must_use]
pub fn touch_input(ev: &TouchEvent) -> PointerInput {
    PointerInput::Touch { touches: touch_points(&ev.touches()), changed: touch_points(&ev.changed_touches()) }
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect()
}
