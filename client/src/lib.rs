//! # client
//!
//! Browser host for the flipbook annotation engine.
//!
//! The `canvas` crate owns every annotation decision. This crate only binds
//! DOM events to it and carries out the [`canvas::engine::Action`]s it
//! returns: deferring saves to the next animation frame, asking for clear
//! confirmation, toggling page classes and cursors, and debouncing resizes.
//! JavaScript drives it through [`annotator::Annotator`].

use wasm_bindgen::prelude::wasm_bindgen;

pub mod annotator;
pub mod effects;
pub mod events;
pub mod gestures;
pub mod keys;
pub mod storage;

/// Install the panic hook and console logger when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        log::warn!("logger already initialized; keeping the existing one");
    }
    log::debug!("flipbook annotator loaded");
}
