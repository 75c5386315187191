//! Canvas2D raster backend.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! The engine drives it through the [`Raster`] trait exactly as it drives the
//! software backend, so everything above this file is browser-agnostic.
//!
//! Every fallible Canvas2D call is mapped to [`RasterError::Js`].

use std::f64::consts::TAU;

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use crate::consts::MIN_SEGMENT_LEN;
use crate::mapper::{Point, Rect};
use crate::raster::{Raster, RasterError};
use crate::snapshot::Snapshot;
use crate::tool::{CompositeMode, StrokeStyle};

/// The eraser strokes with an opaque color; `destination-out` only reads its alpha.
const ERASER_STROKE: &str = "rgba(0,0,0,1)";

/// Stretch `canvas` over the page image by giving it the image's rendered size.
///
/// The bitmap is untouched; only the CSS box changes.
///
/// # Errors
///
/// Returns [`RasterError::Js`] when the style cannot be written.
pub fn fit_overlay(canvas: &HtmlCanvasElement, image: Rect) -> Result<(), RasterError> {
    let (width, height) = image.css_size();
    let style = canvas.style();
    style.set_property("width", &width).map_err(js_err)?;
    style.set_property("height", &height).map_err(js_err)
}

/// A Canvas2D context sized to a page image's natural resolution.
pub struct ContextRaster {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl ContextRaster {
    /// Size `canvas` to `width` x `height` bitmap pixels and take its 2D context.
    ///
    /// Setting the size resets the bitmap, which is why this only happens
    /// once per page load.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] for an empty bitmap and
    /// [`RasterError::ContextUnavailable`] when no 2D context can be created.
    pub fn new(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidSize { width, height });
        }
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or(RasterError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RasterError::ContextUnavailable)?;
        Ok(Self { canvas: canvas.clone(), ctx })
    }

    fn apply_style(&self, style: &StrokeStyle) -> Result<(), RasterError> {
        self.ctx.set_global_composite_operation(style.mode.as_css()).map_err(js_err)?;
        let css = match (style.mode, style.color) {
            (CompositeMode::DestinationOut, _) | (_, None) => ERASER_STROKE.to_string(),
            (CompositeMode::SourceOver, Some(color)) => color.to_css(),
        };
        self.ctx.set_stroke_style_str(&css);
        self.ctx.set_fill_style_str(&css);
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        Ok(())
    }
}

impl Raster for ContextRaster {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) -> Result<(), RasterError> {
        self.ctx.clear_rect(0.0, 0.0, f64::from(self.width()), f64::from(self.height()));
        Ok(())
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) -> Result<(), RasterError> {
        if style.width <= 0.0 {
            return Ok(());
        }
        self.apply_style(style)?;
        self.ctx.begin_path();
        if from.distance(to) < MIN_SEGMENT_LEN {
            self.ctx.arc(from.x, from.y, style.width / 2.0, 0.0, TAU).map_err(js_err)?;
            self.ctx.fill();
        } else {
            self.ctx.move_to(from.x, from.y);
            self.ctx.line_to(to.x, to.y);
            self.ctx.stroke();
        }
        self.ctx.set_global_composite_operation(CompositeMode::SourceOver.as_css()).map_err(js_err)?;
        Ok(())
    }

    fn snapshot(&self) -> Result<Snapshot, RasterError> {
        let (w, h) = (self.width(), self.height());
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, f64::from(w), f64::from(h))
            .map_err(js_err)?;
        Ok(Snapshot::new(w, h, data.data().0)?)
    }

    fn restore(&mut self, snapshot: &Snapshot) -> Result<(), RasterError> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(snapshot.pixels()),
            snapshot.width(),
            snapshot.height(),
        )
        .map_err(js_err)?;
        // put_image_data clips to the canvas like drawImage at the origin.
        self.ctx.put_image_data(&image, 0.0, 0.0).map_err(js_err)?;
        Ok(())
    }

    fn encode(&self) -> Result<String, RasterError> {
        self.canvas.to_data_url_with_type("image/png").map_err(js_err)
    }
}

fn js_err(err: JsValue) -> RasterError {
    RasterError::Js(format!("{err:?}"))
}
