use super::*;
use crate::color::Color;
use crate::mapper::Point;
use crate::raster::PixmapRaster;
use crate::store::{KeyValueStore, MemoryStore};
use crate::tool::{CompositeMode, StrokeStyle};

fn store() -> AnnotationStore {
    AnnotationStore::new(Box::new(MemoryStore::new()), "flipbook")
}

fn raster(width: u32, height: u32) -> Box<dyn Raster> {
    Box::new(PixmapRaster::new(width, height).unwrap())
}

fn ink() -> StrokeStyle {
    StrokeStyle { mode: CompositeMode::SourceOver, color: Some(Color::rgba(0, 0, 255, 1.0)), width: 6.0 }
}

// =============================================================
// Allocation
// =============================================================

#[test]
fn new_lifecycle_has_no_surface() {
    let lifecycle = SurfaceLifecycle::new();
    assert!(lifecycle.current().is_none());
    assert_eq!(lifecycle.page(), None);
}

#[test]
fn allocate_binds_page_at_natural_resolution() {
    let mut lifecycle = SurfaceLifecycle::new();
    let mut store = store();
    lifecycle.allocate(3, raster(100, 150), Rect::new(0.0, 0.0, 50.0, 75.0), &mut store).unwrap();
    let surface = lifecycle.current().unwrap();
    assert_eq!(surface.page(), 3);
    let geo = surface.geometry();
    assert_eq!((geo.bitmap_width, geo.bitmap_height), (100, 150));
    assert_eq!(geo.scale_x(), 2.0);
}

#[test]
fn allocate_starts_blank_without_stored_snapshot() {
    let mut lifecycle = SurfaceLifecycle::new();
    let mut store = store();
    lifecycle.allocate(0, raster(20, 20), Rect::default(), &mut store).unwrap();
    assert!(lifecycle.current().unwrap().raster().snapshot().unwrap().is_blank());
}

#[test]
fn allocate_restores_stored_snapshot() {
    let mut store = store();
    let mut drawn = PixmapRaster::new(20, 20).unwrap();
    drawn.stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), &ink()).unwrap();
    store.save(4, &drawn);

    let mut lifecycle = SurfaceLifecycle::new();
    lifecycle.allocate(4, raster(20, 20), Rect::default(), &mut store).unwrap();
    let restored = lifecycle.current().unwrap().raster().snapshot().unwrap();
    assert_eq!(restored, drawn.snapshot().unwrap());
}

#[test]
fn allocate_replaces_previous_surface() {
    let mut lifecycle = SurfaceLifecycle::new();
    let mut store = store();
    lifecycle.allocate(1, raster(10, 10), Rect::default(), &mut store).unwrap();
    lifecycle.allocate(2, raster(30, 40), Rect::default(), &mut store).unwrap();
    assert_eq!(lifecycle.page(), Some(2));
    assert_eq!(lifecycle.current().unwrap().raster().width(), 30);
}

#[test]
fn allocate_with_corrupt_entry_is_blank_and_drops_key() {
    let mut kv = MemoryStore::new();
    kv.set("flipbook-highlights-page-9", "data:image/png;base64,AAAA").unwrap();
    let mut store = AnnotationStore::new(Box::new(kv), "flipbook");
    let mut lifecycle = SurfaceLifecycle::new();
    lifecycle.allocate(9, raster(10, 10), Rect::default(), &mut store).unwrap();
    assert!(lifecycle.current().unwrap().raster().snapshot().unwrap().is_blank());
    assert!(!store.contains(9));
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_updates_rendered_rect_and_keeps_pixels() {
    let mut lifecycle = SurfaceLifecycle::new();
    let mut store = store();
    lifecycle.allocate(0, raster(20, 20), Rect::new(0.0, 0.0, 20.0, 20.0), &mut store).unwrap();
    let surface = lifecycle.current_mut().unwrap();
    surface.raster_mut().stroke_segment(Point::new(0.0, 10.0), Point::new(20.0, 10.0), &ink()).unwrap();
    let before = surface.raster().snapshot().unwrap();

    lifecycle.resize(Rect::new(5.0, 5.0, 40.0, 40.0));
    let surface = lifecycle.current().unwrap();
    assert_eq!(surface.rendered(), Rect::new(5.0, 5.0, 40.0, 40.0));
    assert_eq!(surface.geometry().scale_x(), 0.5);
    assert_eq!(surface.raster().snapshot().unwrap(), before);
}

#[test]
fn resize_without_surface_is_noop() {
    let mut lifecycle = SurfaceLifecycle::new();
    lifecycle.resize(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert!(lifecycle.current().is_none());
}
