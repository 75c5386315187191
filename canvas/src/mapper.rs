//! Coordinate mapping between rendered (CSS) space and bitmap space.
//!
//! The drawing surface's backing bitmap is sized to the page image's natural
//! resolution, while its on-screen box follows layout and zoom. Every pointer
//! event is mapped through the surface's *current* rendered rectangle, so the
//! scale factors are recomputed per event and never assumed to be 1:1.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

/// A point in client, rendered, or bitmap space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned rectangle in client (CSS pixel) space.
///
/// This is the surface's bounding client rect: `left`/`top` are its origin
/// relative to the viewport, `width`/`height` its rendered size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// CSS `width`/`height` values that give another element this rendered size.
    #[must_use]
    pub fn css_size(&self) -> (String, String) {
        (format!("{}px", self.width), format!("{}px", self.height))
    }
}

/// Everything the mapper needs to know about a bound surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    /// Intrinsic bitmap width in pixels.
    pub bitmap_width: u32,
    /// Intrinsic bitmap height in pixels.
    pub bitmap_height: u32,
    /// Current rendered rectangle in client space.
    pub rendered: Rect,
}

impl SurfaceGeometry {
    /// Horizontal bitmap pixels per rendered pixel.
    #[must_use]
    pub fn scale_x(&self) -> f64 {
        axis_scale(self.bitmap_width, self.rendered.width)
    }

    /// Vertical bitmap pixels per rendered pixel.
    #[must_use]
    pub fn scale_y(&self) -> f64 {
        axis_scale(self.bitmap_height, self.rendered.height)
    }
}

fn axis_scale(bitmap: u32, rendered: f64) -> f64 {
    // A collapsed box (display: none, mid-layout) has no meaningful ratio.
    if rendered > 0.0 { f64::from(bitmap) / rendered } else { 1.0 }
}

/// Map a client-space point into bitmap pixel space.
///
/// Returns the origin when no surface is bound.
#[must_use]
pub fn map_to_bitmap(client: Point, geometry: Option<&SurfaceGeometry>) -> Point {
    let Some(geo) = geometry else {
        return Point::default();
    };
    Point {
        x: (client.x - geo.rendered.left) * geo.scale_x(),
        y: (client.y - geo.rendered.top) * geo.scale_y(),
    }
}
