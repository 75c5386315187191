//! Raster backends for the drawing surface.
//!
//! [`Raster`] is the seam between the drawing engine and pixel storage. The
//! engine only ever strokes segments, clears, and moves snapshots in and out.
//! [`PixmapRaster`] implements it in software with tiny-skia; the browser
//! backend lives in [`crate::render`].

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use tiny_skia::{BlendMode, ColorU8, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::color::Color;
use crate::consts::MIN_SEGMENT_LEN;
use crate::mapper::Point;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::tool::{CompositeMode, StrokeStyle};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// A bitmap cannot be allocated at this size.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    /// The host surface has no 2D rendering context.
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    /// A browser canvas call failed.
    #[error("canvas call failed: {0}")]
    Js(String),
    /// Snapshot encoding or layout failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// A pixel surface the drawing engine can paint into.
pub trait Raster {
    /// Bitmap width in pixels.
    fn width(&self) -> u32;

    /// Bitmap height in pixels.
    fn height(&self) -> u32;

    /// Make every pixel fully transparent.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn clear(&mut self) -> Result<(), RasterError>;

    /// Stroke a straight segment with round caps and joins.
    ///
    /// A zero-length segment paints a round dot of the stroke width.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError>;

    /// Copy the current pixels out.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn snapshot(&self) -> Result<Snapshot, RasterError>;

    /// Replace pixels with `snapshot`, anchored at the origin.
    ///
    /// Only the overlapping region is written; the rest is left untouched.
    ///
    /// # Errors
    ///
    /// Backend-specific failure.
    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError>;

    /// Encode the current pixels as a portable data URI.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Snapshot`] when encoding fails.
    fn encode(&self) -> Result<String, RasterError> {
        Ok(self.snapshot()?.to_data_uri()?)
    }
}

/// Software raster backed by a tiny-skia pixmap.
pub struct PixmapRaster {
    pixmap: Pixmap,
}

impl PixmapRaster {
    /// Allocate a transparent raster.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] for zero or oversized dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self { pixmap })
    }

    fn paint_for(style: &StrokeStyle) -> Paint<'static> {
        let color = style.color.unwrap_or(Color::OPAQUE_BLACK);
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.alpha_u8());
        paint.anti_alias = true;
        paint.blend_mode = match style.mode {
            CompositeMode::SourceOver => BlendMode::SourceOver,
            CompositeMode::DestinationOut => BlendMode::DestinationOut,
        };
        paint
    }
}

impl Raster for PixmapRaster {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear(&mut self) -> Result<(), RasterError> {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError> {
        let paint = Self::paint_for(style);
        let width = style.width as f32;
        if width <= 0.0 {
            return Ok(());
        }

        if from.distance(to) < MIN_SEGMENT_LEN {
            if let Some(dot) = PathBuilder::from_circle(from.x as f32, from.y as f32, width / 2.0) {
                self.pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
            return Ok(());
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return Ok(());
        };
        let stroke = Stroke { width, line_cap: LineCap::Round, line_join: LineJoin::Round, ..Stroke::default() };
        self.pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, RasterError> {
        let mut rgba = Vec::with_capacity(self.pixmap.pixels().len() * 4);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(Snapshot::new(self.width(), self.height(), rgba)?)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError> {
        let cols = self.width().min(snapshot.width()) as usize;
        let rows = self.height().min(snapshot.height()) as usize;
        let dst_stride = self.width() as usize;
        let src_stride = snapshot.width() as usize;
        let src = snapshot.pixels();
        let dst = self.pixmap.pixels_mut();
        for y in 0..rows {
            for x in 0..cols {
                let s = (y * src_stride + x) * 4;
                dst[y * dst_stride + x] = ColorU8::from_rgba(src[s], src[s + 1], src[s + 2], src[s + 3]).premultiply();
            }
        }
        Ok(())
    }
}
