//! Page-local annotation engine for the flipbook viewer.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! drawing surface laid over the displayed page image: mapping pointer input
//! into bitmap space, compositing pen, highlighter and eraser strokes,
//! persisting one raster snapshot per page, and keeping the page's pan/pinch
//! gestures out of the way while a stroke is in progress. The host layer is
//! responsible only for wiring DOM events to the engine and acting on the
//! resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`surface`] | The live surface and its per-page lifecycle |
//! | [`mapper`] | Client-to-bitmap coordinate mapping |
//! | [`input`] | Pointer/touch input types and the stroke state machine |
//! | [`tool`] | Tools, swatches and resolved stroke styles |
//! | [`color`] | CSS color parsing |
//! | [`raster`] | Raster trait and the tiny-skia software backend |
//! | [`render`] | Canvas2D raster backend |
//! | [`snapshot`] | RGBA snapshots and their PNG data-URI codec |
//! | [`store`] | Key-value storage and per-page annotation persistence |
//! | [`prefs`] | Cross-session tool preferences |
//! | [`gesture`] | Pan/pinch gesture control seam |
//! | [`config`] | Host-supplied configuration |
//! | [`consts`] | Shared constants (brush limits, key prefixes, etc.) |

pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod gesture;
pub mod input;
pub mod mapper;
pub mod prefs;
pub mod raster;
pub mod render;
pub mod snapshot;
pub mod store;
pub mod surface;
pub mod tool;
