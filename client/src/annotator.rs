//! JavaScript-facing annotator: owns the engine and its DOM bindings.
//!
//! ARCHITECTURE
//! ============
//! One [`Annotator`] lives for the page. It binds window resize and document
//! keydown once, and rebinds the surface listeners every time a page image is
//! attached. Engine calls return actions; [`dispatch`] folds them into
//! [`HostEffects`] and applies those to the DOM. Saves run on the next
//! animation frame so a stroke's release never waits on PNG encoding.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canvas::config::AnnotationConfig;
use canvas::engine::{Action, Engine};
use canvas::input::Key;
use canvas::tool::{Cursor, Tool};
use gloo_timers::callback::Timeout;
use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent};

use crate::effects::{CLEAR_PROMPT, HostEffects, MODE_BODY_CLASS};
use crate::events::{SURFACE_EVENTS, SurfaceEvent, is_touch_type, mouse_input, touch_input};
use crate::gestures::JsGestures;
use crate::keys::{is_annotation_shortcut, is_text_entry};
use crate::storage::open_store;

/// State shared between the annotator and its event callbacks.
struct Session {
    engine: RefCell<Engine>,
    persist_scheduled: Cell<bool>,
    persist_frame: RefCell<Option<Closure<dyn FnMut(f64)>>>,
    resize_timer: RefCell<Option<Timeout>>,
    resize_debounce_ms: u32,
}

/// An event listener that unbinds itself when dropped.
struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// `passive: Some(false)` lets touch handlers call `preventDefault`.
    fn bind(
        target: &EventTarget,
        event_type: &'static str,
        passive: Option<bool>,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Option<Self> {
        let function: &Function = callback.as_ref().unchecked_ref();
        let result = match passive {
            Some(passive) => {
                let options = AddEventListenerOptions::new();
                options.set_passive(passive);
                target.add_event_listener_with_callback_and_add_event_listener_options(event_type, function, &options)
            }
            None => target.add_event_listener_with_callback(event_type, function),
        };
        match result {
            Ok(()) => Some(Self { target: target.clone(), event_type, callback }),
            Err(err) => {
                log::error!("failed to bind {event_type}: {err:?}");
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let function: &Function = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.target.remove_event_listener_with_callback(self.event_type, function) {
            log::warn!("failed to unbind {}: {err:?}", self.event_type);
        }
    }
}

#[wasm_bindgen]
pub struct Annotator {
    session: Rc<Session>,
    surface_listeners: Vec<Listener>,
    page_listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Annotator {
    /// Start an annotation session.
    ///
    /// `config_json` is an optional JSON annotation config. The callbacks
    /// switch the page's pan and pinch gestures; each receives a boolean.
    ///
    /// # Errors
    ///
    /// Fails when `config_json` is malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        set_pan_enabled: Option<Function>,
        set_pinch_enabled: Option<Function>,
    ) -> Result<Annotator, JsError> {
        let config = match config_json.as_deref() {
            Some(raw) => AnnotationConfig::from_json(raw)?,
            None => AnnotationConfig::default(),
        };
        let resize_debounce_ms = config.resize_debounce_ms;
        let gestures = JsGestures::new(set_pan_enabled, set_pinch_enabled);
        let engine = Engine::new(config, open_store(), Box::new(gestures));

        let session = Rc::new(Session {
            engine: RefCell::new(engine),
            persist_scheduled: Cell::new(false),
            persist_frame: RefCell::new(None),
            resize_timer: RefCell::new(None),
            resize_debounce_ms,
        });
        let page_listeners = bind_page_listeners(&session);
        Ok(Self { session, surface_listeners: Vec::new(), page_listeners })
    }

    /// Lay `canvas` over `image` and bind it to `page`. Call from the image's
    /// `load` event, once its natural size is known.
    ///
    /// Returns whether the surface is ready for drawing.
    #[wasm_bindgen(js_name = attachPage)]
    pub fn attach_page(&mut self, canvas: HtmlCanvasElement, image: HtmlImageElement, page: usize) -> bool {
        self.surface_listeners.clear();
        let ready = self.session.engine.borrow_mut().attach_page(canvas.clone(), image, page);
        self.surface_listeners = bind_surface_listeners(&self.session, &canvas);
        let cursor = self.session.engine.borrow().cursor();
        apply_cursor(&self.session, cursor);
        ready
    }

    /// Select a tool by name (`pen`, `highlight`, `eraser`). Unknown names are ignored.
    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&self, name: &str) -> bool {
        let Some(tool) = Tool::parse(name) else {
            log::warn!("unknown tool {name:?}");
            return false;
        };
        let actions = self.session.engine.borrow_mut().set_tool(tool);
        dispatch(&self.session, actions);
        true
    }

    #[wasm_bindgen(js_name = selectSwatch)]
    pub fn select_swatch(&self, index: usize) {
        let actions = self.session.engine.borrow_mut().select_swatch(index);
        dispatch(&self.session, actions);
    }

    /// Slider `input`: applies immediately, not remembered.
    #[wasm_bindgen(js_name = setBrushSize)]
    pub fn set_brush_size(&self, size: f64) {
        self.session.engine.borrow_mut().set_brush_size(size);
    }

    /// Slider `change`: applies and remembers.
    #[wasm_bindgen(js_name = commitBrushSize)]
    pub fn commit_brush_size(&self, size: f64) {
        self.session.engine.borrow_mut().commit_brush_size(size);
    }

    #[wasm_bindgen(js_name = setAnnotationMode)]
    pub fn set_annotation_mode(&self, enabled: bool) {
        let actions = self.session.engine.borrow_mut().set_annotation_mode(enabled);
        dispatch(&self.session, actions);
    }

    /// Returns the new mode.
    #[wasm_bindgen(js_name = toggleAnnotationMode)]
    pub fn toggle_annotation_mode(&self) -> bool {
        let actions = self.session.engine.borrow_mut().toggle_annotation_mode();
        dispatch(&self.session, actions);
        self.annotation_mode()
    }

    /// Erase the current page's annotations after the user confirms.
    #[wasm_bindgen(js_name = clearCurrentPage)]
    pub fn clear_current_page(&self) {
        let actions = self.session.engine.borrow_mut().request_clear();
        dispatch(&self.session, actions);
    }

    /// Re-fit the overlay to the page image now instead of waiting for a resize.
    #[wasm_bindgen(js_name = refreshLayout)]
    pub fn refresh_layout(&self) {
        self.session.engine.borrow_mut().refresh_layout();
    }

    /// Write any pending save immediately (e.g. on `pagehide`).
    pub fn flush(&self) -> bool {
        self.session.engine.borrow_mut().flush_persist()
    }

    #[wasm_bindgen(getter)]
    pub fn tool(&self) -> String {
        self.session.engine.borrow().core.tools().tool.as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = swatchIndex)]
    pub fn swatch_index(&self) -> usize {
        self.session.engine.borrow().core.tools().swatch_index
    }

    #[wasm_bindgen(getter, js_name = brushSize)]
    pub fn brush_size(&self) -> f64 {
        self.session.engine.borrow().core.tools().brush_size
    }

    #[wasm_bindgen(getter, js_name = annotationMode)]
    pub fn annotation_mode(&self) -> bool {
        self.session.engine.borrow().core.mode_enabled()
    }

    #[wasm_bindgen(getter, js_name = currentPage)]
    pub fn current_page(&self) -> Option<usize> {
        self.session.engine.borrow().current_page()
    }
}

impl Drop for Annotator {
    fn drop(&mut self) {
        self.surface_listeners.clear();
        self.page_listeners.clear();
        self.session.resize_timer.borrow_mut().take();
        self.session.engine.borrow_mut().flush_persist();
        self.session.persist_frame.borrow_mut().take();
    }
}

// =============================================================
// Event handling
// =============================================================

fn bind_surface_listeners(session: &Rc<Session>, canvas: &HtmlCanvasElement) -> Vec<Listener> {
    SURFACE_EVENTS
        .iter()
        .filter_map(|&(event_type, kind, touch)| {
            let for_event = Rc::clone(session);
            let callback =
                Closure::wrap(Box::new(move |event: Event| on_surface_event(&for_event, kind, &event)) as Box<dyn FnMut(Event)>);
            Listener::bind(canvas, event_type, touch.then_some(false), callback)
        })
        .collect()
}

fn bind_page_listeners(session: &Rc<Session>) -> Vec<Listener> {
    let mut listeners = Vec::new();
    let Some(window) = web_sys::window() else {
        return listeners;
    };

    let for_resize = Rc::clone(session);
    let resize = Closure::wrap(Box::new(move |_event: Event| on_resize(&for_resize)) as Box<dyn FnMut(Event)>);
    listeners.extend(Listener::bind(&window, "resize", None, resize));

    if let Some(document) = window.document() {
        let for_keys = Rc::clone(session);
        let keydown = Closure::wrap(Box::new(move |event: Event| on_key_down(&for_keys, &event)) as Box<dyn FnMut(Event)>);
        listeners.extend(Listener::bind(&document, "keydown", None, keydown));
    }
    listeners
}

fn on_surface_event(session: &Rc<Session>, kind: SurfaceEvent, event: &Event) {
    let input = match event.dyn_ref::<TouchEvent>() {
        Some(touch) => Some(touch_input(touch)),
        None => event.dyn_ref::<MouseEvent>().map(mouse_input),
    };

    let (actions, stroking) = {
        let mut engine = session.engine.borrow_mut();
        let actions = match (kind, input) {
            (SurfaceEvent::Leave, input) => engine.on_pointer_leave(input.as_ref()),
            (SurfaceEvent::Down, Some(input)) => engine.on_pointer_down(&input),
            (SurfaceEvent::Move, Some(input)) => engine.on_pointer_move(&input),
            (SurfaceEvent::Up, Some(input)) => engine.on_pointer_up(&input),
            (_, None) => Vec::new(),
        };
        (actions, engine.core.is_stroking())
    };

    // Keep the page from scrolling or zooming under a drawing finger.
    if stroking && is_touch_type(&event.type_()) && matches!(kind, SurfaceEvent::Down | SurfaceEvent::Move) {
        event.prevent_default();
    }
    dispatch(session, actions);
}

fn on_key_down(session: &Rc<Session>, event: &Event) {
    let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    if is_text_entry(active_element_tag().as_deref()) {
        return;
    }
    let key = key_event.key();
    if !is_annotation_shortcut(&key) {
        return;
    }
    event.prevent_default();
    let actions = session.engine.borrow_mut().on_key_down(&Key(key));
    dispatch(session, actions);
}

/// Debounce: each resize replaces (and so cancels) the pending timer.
fn on_resize(session: &Rc<Session>) {
    let for_timer = Rc::clone(session);
    let timer = Timeout::new(session.resize_debounce_ms, move || {
        for_timer.engine.borrow_mut().refresh_layout();
    });
    *session.resize_timer.borrow_mut() = Some(timer);
}

fn active_element_tag() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.active_element().map(|el| el.tag_name())
}

// =============================================================
// Effects
// =============================================================

fn dispatch(session: &Rc<Session>, actions: Vec<Action>) {
    let effects = HostEffects::from_actions(&actions);
    if effects.is_empty() {
        return;
    }
    if let Some(enabled) = effects.body_mode {
        set_body_mode(enabled);
    }
    if let Some(cursor) = effects.cursor {
        apply_cursor(session, cursor);
    }
    if effects.schedule_persist {
        schedule_persist(session);
    }
    if let Some(page) = effects.confirm_clear {
        if confirm(CLEAR_PROMPT) {
            let cleared = session.engine.borrow_mut().clear_annotations(page);
            dispatch(session, cleared);
        }
    }
}

fn schedule_persist(session: &Rc<Session>) {
    if session.persist_scheduled.replace(true) {
        return;
    }
    let Some(window) = web_sys::window() else {
        flush_now(session);
        return;
    };

    let for_frame = Rc::clone(session);
    let callback = Closure::wrap(Box::new(move |_ts: f64| {
        for_frame.persist_scheduled.set(false);
        for_frame.engine.borrow_mut().flush_persist();
    }) as Box<dyn FnMut(f64)>);

    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(_) => *session.persist_frame.borrow_mut() = Some(callback),
        Err(err) => {
            log::warn!("requestAnimationFrame failed, saving now: {err:?}");
            flush_now(session);
        }
    }
}

fn flush_now(session: &Session) {
    session.persist_scheduled.set(false);
    session.engine.borrow_mut().flush_persist();
}

fn apply_cursor(session: &Session, cursor: Cursor) {
    let engine = session.engine.borrow();
    let Some(canvas) = engine.canvas() else {
        return;
    };

    let classes = canvas.class_list();
    for class in [Cursor::Highlighter, Cursor::Eraser].iter().filter_map(|c| c.css_class()) {
        if let Err(err) = classes.remove_1(class) {
            log::warn!("failed to remove cursor class {class}: {err:?}");
        }
    }
    if let Some(class) = cursor.css_class() {
        if let Err(err) = classes.add_1(class) {
            log::warn!("failed to add cursor class {class}: {err:?}");
        }
    }

    let style = canvas.style();
    let result = match cursor.css_value() {
        "" => style.remove_property("cursor").map(|_| ()),
        value => style.set_property("cursor", value),
    };
    if let Err(err) = result {
        log::warn!("failed to set cursor style: {err:?}");
    }
}

fn set_body_mode(enabled: bool) {
    let Some(body) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    if let Err(err) = body.class_list().toggle_with_force(MODE_BODY_CLASS, enabled) {
        log::warn!("failed to toggle {MODE_BODY_CLASS}: {err:?}");
    }
}

fn confirm(prompt: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.confirm_with_message(prompt) {
        Ok(answer) => answer,
        Err(err) => {
            log::warn!("confirm dialog failed: {err:?}");
            false
        }
    }
}
