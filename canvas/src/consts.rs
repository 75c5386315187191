//! Shared numeric and string constants for the canvas crate.

// ── Brush ───────────────────────────────────────────────────────

/// Brush size used when neither config nor preferences supply one.
pub const DEFAULT_BRUSH_SIZE: f64 = 40.0;

/// Smallest brush size the slider allows by default.
pub const DEFAULT_BRUSH_MIN: f64 = 1.0;

/// Largest brush size the slider allows by default.
pub const DEFAULT_BRUSH_MAX: f64 = 100.0;

/// The pen draws at `brush_size / PEN_WIDTH_DIVISOR`.
pub const PEN_WIDTH_DIVISOR: f64 = 10.0;

// ── Geometry ────────────────────────────────────────────────────

/// Segments shorter than this (bitmap pixels) are drawn as a round dot.
pub const MIN_SEGMENT_LEN: f64 = 1e-6;

// ── Layout ──────────────────────────────────────────────────────

/// Delay before a window resize is applied to the surface layout.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u32 = 150;

// ── Storage ─────────────────────────────────────────────────────

/// Key prefix shared by every stored entry.
pub const DEFAULT_NAMESPACE: &str = "flipbook";

/// Prefix for data-URI encoded PNG snapshots.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
