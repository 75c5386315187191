//! Input model: pointer/touch samples, keys, and the stroke state machine.
//!
//! `PointerInput` is a host-neutral copy of a DOM mouse or touch event,
//! reduced to the client coordinates the engine needs. `InputState` is the
//! drawing engine's state: `Idle` or `Stroking`, where the active variant
//! carries everything needed to draw the next segment and commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::mapper::Point;
use crate::surface::PageId;
use crate::tool::{StrokeStyle, Tool};

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"d"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// A pointer event in client (viewport CSS pixel) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    /// A mouse event.
    Mouse { client: Point },
    /// A touch event.
    Touch {
        /// Touches currently on the surface (`TouchEvent.touches`).
        touches: Vec<Point>,
        /// Touches that changed in this event (`TouchEvent.changedTouches`).
        changed: Vec<Point>,
    },
}

impl PointerInput {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse { client: Point::new(x, y) }
    }

    /// A single-finger touch event whose only touch is both active and changed.
    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        let p = Point::new(x, y);
        Self::Touch { touches: vec![p], changed: vec![p] }
    }

    /// Whether more than one finger is down.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        matches!(self, Self::Touch { touches, .. } if touches.len() > 1)
    }

    /// The client point that drives the stroke.
    ///
    /// The first active touch wins while any finger remains down, so a
    /// second finger lifting ends the stroke under the drawing finger. Only
    /// when no touch is left does the lifted finger (first changed touch)
    /// supply the point.
    #[must_use]
    pub fn client_point(&self) -> Option<Point> {
        match self {
            Self::Mouse { client } => Some(*client),
            Self::Touch { touches, changed } => touches.first().or_else(|| changed.first()).copied(),
        }
    }
}

/// An in-progress stroke. Never persisted; only its raster effect survives.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Page whose surface was live when the stroke began.
    pub page: PageId,
    /// Tool latched at stroke start.
    pub tool: Tool,
    /// Style latched at stroke start.
    pub style: StrokeStyle,
    /// Bitmap-space press point.
    pub origin: Point,
    /// Start of the next freehand segment; advances after every segment.
    pub anchor: Point,
    /// Most recent mapped pointer position.
    pub last: Point,
}

impl Stroke {
    #[must_use]
    pub fn begin(page: PageId, tool: Tool, style: StrokeStyle, start: Point) -> Self {
        Self { page, tool, style, origin: start, anchor: start, last: start }
    }
}

/// Drawing engine state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No stroke in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A stroke is in progress.
    Stroking(Stroke),
}

impl InputState {
    #[must_use]
    pub fn is_stroking(&self) -> bool {
        matches!(self, Self::Stroking(_))
    }
}
