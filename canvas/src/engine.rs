use web_sys::{Element, HtmlCanvasElement, HtmlImageElement};

use crate::config::AnnotationConfig;
use crate::gesture::GestureCoordinator;
use crate::input::{InputState, Key, PointerInput, Stroke};
use crate::mapper::{Point, Rect, map_to_bitmap};
use crate::prefs::{self, Preferences};
use crate::raster::Raster;
use crate::render::{ContextRaster, fit_overlay};
use crate::store::{AnnotationStore, KeyValueStore};
use crate::surface::{PageId, Surface, SurfaceLifecycle};
use crate::tool::{Cursor, StrokeStyle, Tool, ToolConfig};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A stroke began on `page`; page gestures are now suspended.
    StrokeStarted { page: PageId },
    /// A stroke finished; call [`EngineCore::flush_persist`] on the next frame.
    PersistRequested { page: PageId },
    /// Ask the user to confirm, then call [`EngineCore::clear_annotations`].
    ConfirmClearRequested { page: PageId },
    /// The page's annotations were erased live and in storage.
    AnnotationsCleared { page: PageId },
    /// Annotation mode switched on or off.
    ModeChanged(bool),
    SetCursor(Cursor),
}

/// Core engine state: all logic that does not touch the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// This is the whole annotation session: tool state, the live surface, the
/// stroke state machine and the store. Hosts mutate it only through its
/// operations.
pub struct EngineCore {
    config: AnnotationConfig,
    tools: ToolConfig,
    mode_enabled: bool,
    input: InputState,
    lifecycle: SurfaceLifecycle,
    store: AnnotationStore,
    gestures: Box<dyn GestureCoordinator>,
    pending_persist: Option<PageId>,
}

impl EngineCore {
    /// Start a session, restoring tool preferences from `kv`.
    #[must_use]
    pub fn new(config: AnnotationConfig, kv: Box<dyn KeyValueStore>, gestures: Box<dyn GestureCoordinator>) -> Self {
        let tools = Preferences::load(kv.as_ref(), &config).to_tool_config(&config);
        let store = AnnotationStore::new(kv, config.namespace.clone());
        Self {
            config,
            tools,
            mode_enabled: false,
            input: InputState::default(),
            lifecycle: SurfaceLifecycle::new(),
            store,
            gestures,
            pending_persist: None,
        }
    }

    // --- Surface lifecycle ---

    /// Bind a new surface after the page image reports its natural size.
    ///
    /// An in-flight stroke is committed on the old surface and its pending
    /// save is flushed before the switch. Returns whether a surface is bound.
    pub fn on_page_ready(&mut self, page: PageId, raster: Box<dyn Raster>, rendered: Rect) -> bool {
        if let InputState::Stroking(stroke) = &self.input {
            let last = stroke.last;
            self.finish_stroke(last);
        }
        self.flush_persist();

        match self.lifecycle.allocate(page, raster, rendered, &mut self.store) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to prepare surface for page {page}: {err}");
                false
            }
        }
    }

    /// Record the surface's new rendered rectangle after a layout change.
    pub fn on_resize(&mut self, rendered: Rect) {
        self.lifecycle.resize(rendered);
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Vec<Action> {
        if !self.mode_enabled || self.input.is_stroking() || input.is_multi_touch() {
            return Vec::new();
        }
        let Some(surface) = self.lifecycle.current() else {
            return Vec::new();
        };
        let Some(client) = input.client_point() else {
            return Vec::new();
        };
        let page = surface.page();
        let start = map_to_bitmap(client, Some(&surface.geometry()));

        self.gestures.set_pan_enabled(false);
        self.gestures.set_pinch_enabled(false);
        self.input = InputState::Stroking(Stroke::begin(page, self.tools.tool, self.tools.style(), start));
        vec![Action::StrokeStarted { page }]
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Vec<Action> {
        let InputState::Stroking(stroke) = &self.input else {
            return Vec::new();
        };
        let Some(point) = self.map_for(stroke.page, input) else {
            return Vec::new();
        };

        let stroke = stroke.clone();
        if stroke.tool.is_freehand() {
            self.draw(stroke.page, stroke.anchor, point, &stroke.style);
        }
        if let InputState::Stroking(active) = &mut self.input {
            if stroke.tool.is_freehand() {
                active.anchor = point;
            }
            active.last = point;
        }
        Vec::new()
    }

    /// Pointer-up, touch-end, touch-cancel and pointer-leave all commit.
    pub fn on_pointer_up(&mut self, input: &PointerInput) -> Vec<Action> {
        let InputState::Stroking(stroke) = &self.input else {
            return Vec::new();
        };
        let release = self.map_for(stroke.page, input).unwrap_or(stroke.last);
        self.finish_stroke(release)
    }

    /// Commit the active stroke where the pointer left the surface, or at
    /// its last tracked point when the leave event carries no position.
    pub fn on_pointer_leave(&mut self, input: Option<&PointerInput>) -> Vec<Action> {
        let InputState::Stroking(stroke) = &self.input else {
            return Vec::new();
        };
        let exit = input.and_then(|input| self.map_for(stroke.page, input)).unwrap_or(stroke.last);
        self.finish_stroke(exit)
    }

    fn finish_stroke(&mut self, release: Point) -> Vec<Action> {
        let InputState::Stroking(stroke) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let from = if stroke.tool.is_freehand() { stroke.anchor } else { stroke.origin };
        self.draw(stroke.page, from, release, &stroke.style);

        self.gestures.set_pan_enabled(true);
        self.gestures.set_pinch_enabled(true);
        self.pending_persist = Some(stroke.page);
        vec![Action::PersistRequested { page: stroke.page }]
    }

    /// Map `input` against the surface bound to `page`, if it is still live.
    fn map_for(&self, page: PageId, input: &PointerInput) -> Option<Point> {
        let surface = self.live_surface(page)?;
        let client = input.client_point()?;
        Some(map_to_bitmap(client, Some(&surface.geometry())))
    }

    fn live_surface(&self, page: PageId) -> Option<&Surface> {
        self.lifecycle.current().filter(|s| s.page() == page)
    }

    fn draw(&mut self, page: PageId, from: Point, to: Point, style: &StrokeStyle) {
        let Some(surface) = self.lifecycle.current_mut().filter(|s| s.page() == page) else {
            return;
        };
        if let Err(err) = surface.raster_mut().stroke_segment(from, to, style) {
            log::warn!("stroke on page {page} failed: {err}");
        }
    }

    // --- Persistence ---

    /// Write the pending snapshot, if any. Call once per animation frame.
    ///
    /// Returns whether a snapshot was written.
    pub fn flush_persist(&mut self) -> bool {
        let Some(page) = self.pending_persist.take() else {
            return false;
        };
        let Some(surface) = self.lifecycle.current().filter(|s| s.page() == page) else {
            log::warn!("dropping save for page {page}: surface no longer bound");
            return false;
        };
        self.store.save(page, surface.raster())
    }

    /// Ask the host to confirm erasing the current page.
    pub fn request_clear(&mut self) -> Vec<Action> {
        match self.lifecycle.page() {
            Some(page) => vec![Action::ConfirmClearRequested { page }],
            None => Vec::new(),
        }
    }

    /// Erase `page` after the user confirmed.
    ///
    /// The live surface is cleared only if it shows `page`. Other pages'
    /// stored annotations are never touched.
    pub fn clear_annotations(&mut self, page: PageId) -> Vec<Action> {
        if let Some(surface) = self.lifecycle.current_mut().filter(|s| s.page() == page) {
            if let Err(err) = surface.raster_mut().clear() {
                log::warn!("failed to clear surface for page {page}: {err}");
            }
        }
        if self.pending_persist == Some(page) {
            self.pending_persist = None;
        }
        self.store.clear(page);
        log::debug!("cleared annotations for page {page}");
        vec![Action::AnnotationsCleared { page }]
    }

    // --- Tool state ---

    /// Set the active tool. A stroke in flight keeps its latched tool.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.tools.tool = tool;
        prefs::save_tool(self.store.kv_mut(), &self.config.namespace, tool);
        vec![Action::SetCursor(self.cursor())]
    }

    /// Select a palette swatch. Selecting while erasing switches to the pen.
    pub fn select_swatch(&mut self, index: usize) -> Vec<Action> {
        let Some(swatch) = self.config.swatches.get(index).copied() else {
            log::warn!("ignoring unknown swatch {index}");
            return Vec::new();
        };
        self.tools.swatch_index = index;
        self.tools.swatch = swatch;
        prefs::save_color(self.store.kv_mut(), &self.config.namespace, &swatch);
        if self.tools.tool == Tool::Eraser {
            return self.set_tool(Tool::Pen);
        }
        Vec::new()
    }

    /// Live brush size update (slider drag). Not persisted.
    pub fn set_brush_size(&mut self, size: f64) {
        self.tools.brush_size = self.config.brush.clamp(size);
    }

    /// Final brush size (slider release). Persisted.
    pub fn commit_brush_size(&mut self, size: f64) {
        self.set_brush_size(size);
        prefs::save_brush_size(self.store.kv_mut(), &self.config.namespace, self.tools.brush_size);
    }

    // --- Annotation mode ---

    pub fn set_annotation_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.mode_enabled = enabled;
        vec![Action::ModeChanged(enabled), Action::SetCursor(self.cursor())]
    }

    pub fn toggle_annotation_mode(&mut self) -> Vec<Action> {
        self.set_annotation_mode(!self.mode_enabled)
    }

    /// `d` toggles annotation mode; `Delete`/`Backspace` asks to clear while it is on.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        match key.0.as_str() {
            "d" | "D" => self.toggle_annotation_mode(),
            "Delete" | "Backspace" if self.mode_enabled => self.request_clear(),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &AnnotationConfig {
        &self.config
    }

    #[must_use]
    pub fn tools(&self) -> &ToolConfig {
        &self.tools
    }

    #[must_use]
    pub fn mode_enabled(&self) -> bool {
        self.mode_enabled
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::for_tool(self.mode_enabled, self.tools.tool)
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn is_stroking(&self) -> bool {
        self.input.is_stroking()
    }

    #[must_use]
    pub fn current_page(&self) -> Option<PageId> {
        self.lifecycle.page()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.lifecycle.current()
    }

    #[must_use]
    pub fn pending_persist(&self) -> Option<PageId> {
        self.pending_persist
    }

    #[must_use]
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }
}

/// The full annotation engine. Wraps `EngineCore` and owns the canvas overlay
/// and the page image it is laid over.
pub struct Engine {
    canvas: Option<HtmlCanvasElement>,
    image: Option<HtmlImageElement>,
    pub core: EngineCore,
}

impl Engine {
    #[must_use]
    pub fn new(config: AnnotationConfig, kv: Box<dyn KeyValueStore>, gestures: Box<dyn GestureCoordinator>) -> Self {
        Self { canvas: None, image: None, core: EngineCore::new(config, kv, gestures) }
    }

    // --- Surface lifecycle ---

    /// Bind `canvas` to `page` once `image` has loaded.
    ///
    /// The bitmap takes the image's natural resolution and the canvas box is
    /// stretched over the image's rendered rect. Returns whether the surface
    /// is ready for drawing.
    pub fn attach_page(&mut self, canvas: HtmlCanvasElement, image: HtmlImageElement, page: PageId) -> bool {
        let raster = match ContextRaster::new(&canvas, image.natural_width(), image.natural_height()) {
            Ok(raster) => raster,
            Err(err) => {
                log::error!("canvas for page {page} unusable: {err}");
                self.canvas = None;
                self.image = None;
                return false;
            }
        };
        let rendered = fit_to_image(&canvas, &image);
        self.canvas = Some(canvas);
        self.image = Some(image);
        self.core.on_page_ready(page, Box::new(raster), rendered)
    }

    /// Re-fit the overlay to the page image. Call after a (debounced) resize.
    pub fn refresh_layout(&mut self) {
        if let (Some(canvas), Some(image)) = (&self.canvas, &self.image) {
            self.core.on_resize(fit_to_image(canvas, image));
        }
    }

    /// Pick up zoom or scroll since the last event without restyling.
    fn sync_layout(&mut self) {
        if let Some(image) = &self.image {
            self.core.on_resize(element_rect(image));
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, input: &PointerInput) -> Vec<Action> {
        self.sync_layout();
        self.core.on_pointer_down(input)
    }

    pub fn on_pointer_move(&mut self, input: &PointerInput) -> Vec<Action> {
        self.sync_layout();
        self.core.on_pointer_move(input)
    }

    pub fn on_pointer_up(&mut self, input: &PointerInput) -> Vec<Action> {
        self.sync_layout();
        self.core.on_pointer_up(input)
    }

    pub fn on_pointer_leave(&mut self, input: Option<&PointerInput>) -> Vec<Action> {
        self.sync_layout();
        self.core.on_pointer_leave(input)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        self.core.on_key_down(key)
    }

    // --- Delegated operations ---

    pub fn flush_persist(&mut self) -> bool {
        self.core.flush_persist()
    }

    pub fn request_clear(&mut self) -> Vec<Action> {
        self.core.request_clear()
    }

    pub fn clear_annotations(&mut self, page: PageId) -> Vec<Action> {
        self.core.clear_annotations(page)
    }

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        self.core.set_tool(tool)
    }

    pub fn select_swatch(&mut self, index: usize) -> Vec<Action> {
        self.core.select_swatch(index)
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.core.set_brush_size(size);
    }

    pub fn commit_brush_size(&mut self, size: f64) {
        self.core.commit_brush_size(size);
    }

    pub fn set_annotation_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.core.set_annotation_mode(enabled)
    }

    pub fn toggle_annotation_mode(&mut self) -> Vec<Action> {
        self.core.toggle_annotation_mode()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.core.cursor()
    }

    #[must_use]
    pub fn current_page(&self) -> Option<PageId> {
        self.core.current_page()
    }
}

/// Size the overlay to the image and return the image's rect for mapping.
fn fit_to_image(canvas: &HtmlCanvasElement, image: &HtmlImageElement) -> Rect {
    let rendered = element_rect(image);
    if let Err(err) = fit_overlay(canvas, rendered) {
        log::warn!("failed to size overlay to page image: {err}");
    }
    rendered
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}
