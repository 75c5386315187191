//! The live drawing surface and its per-page lifecycle.
//!
//! Exactly one surface exists at a time, bound to the displayed page. It is
//! reallocated at the page image's natural resolution on navigation and
//! restored from the annotation store. Layout changes only update the
//! rendered rectangle; the bitmap and its pixels are never touched by a
//! resize.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::mapper::{Rect, SurfaceGeometry};
use crate::raster::{Raster, RasterError};
use crate::store::AnnotationStore;

/// Zero-based page index.
pub type PageId = usize;

/// A raster bound to one page, plus its current on-screen rectangle.
pub struct Surface {
    page: PageId,
    raster: Box<dyn Raster>,
    rendered: Rect,
}

impl Surface {
    #[must_use]
    pub fn page(&self) -> PageId {
        self.page
    }

    #[must_use]
    pub fn rendered(&self) -> Rect {
        self.rendered
    }

    pub fn set_rendered(&mut self, rendered: Rect) {
        self.rendered = rendered;
    }

    /// Bitmap size and rendered rect, as the coordinate mapper needs them.
    #[must_use]
    pub fn geometry(&self) -> SurfaceGeometry {
        SurfaceGeometry {
            bitmap_width: self.raster.width(),
            bitmap_height: self.raster.height(),
            rendered: self.rendered,
        }
    }

    #[must_use]
    pub fn raster(&self) -> &dyn Raster {
        self.raster.as_ref()
    }

    pub fn raster_mut(&mut self) -> &mut dyn Raster {
        self.raster.as_mut()
    }
}

/// Owns the single live surface.
#[derive(Default)]
pub struct SurfaceLifecycle {
    surface: Option<Surface>,
}

impl SurfaceLifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a freshly allocated raster to `page`.
    ///
    /// The raster is cleared, then the page's stored snapshot (if any) is
    /// drawn onto it. Any previous surface is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError`] if the raster cannot be cleared or restored.
    /// The previous surface is released either way.
    pub fn allocate(
        &mut self,
        page: PageId,
        mut raster: Box<dyn Raster>,
        rendered: Rect,
        store: &mut AnnotationStore,
    ) -> Result<(), RasterError> {
        self.surface = None;

        raster.clear()?;
        if let Some(snapshot) = store.load(page) {
            raster.restore(&snapshot)?;
        }
        log::debug!("surface for page {page} allocated at {}x{}", raster.width(), raster.height());
        self.surface = Some(Surface { page, raster, rendered });
        Ok(())
    }

    /// Record a new rendered rectangle. Bitmap and pixels are unchanged.
    pub fn resize(&mut self, rendered: Rect) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_rendered(rendered);
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    /// Page of the live surface.
    #[must_use]
    pub fn page(&self) -> Option<PageId> {
        self.surface.as_ref().map(Surface::page)
    }
}
