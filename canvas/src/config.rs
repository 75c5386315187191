//! Annotation configuration supplied by the host page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{
    DEFAULT_BRUSH_MAX, DEFAULT_BRUSH_MIN, DEFAULT_BRUSH_SIZE, DEFAULT_NAMESPACE, DEFAULT_RESIZE_DEBOUNCE_MS,
};
use crate::tool::{Swatch, Tool};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid annotation config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("namespace must not be empty")]
    EmptyNamespace,
    #[error("at least one swatch is required")]
    NoSwatches,
    #[error("brush limits must satisfy 0 < min <= default <= max (got min={min}, default={default}, max={max})")]
    BrushLimits { min: f64, default: f64, max: f64 },
}

/// Brush slider range and starting value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushLimits {
    pub default: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for BrushLimits {
    fn default() -> Self {
        Self { default: DEFAULT_BRUSH_SIZE, min: DEFAULT_BRUSH_MIN, max: DEFAULT_BRUSH_MAX }
    }
}

impl BrushLimits {
    /// Clamp `size` into `[min, max]`; non-finite values become the default.
    #[must_use]
    pub fn clamp(&self, size: f64) -> f64 {
        if size.is_finite() { size.clamp(self.min, self.max) } else { self.default }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Prefix for every stored key.
    pub namespace: String,
    pub default_tool: Tool,
    pub brush: BrushLimits,
    pub resize_debounce_ms: u32,
    /// Toolbar palette, in display order.
    pub swatches: Vec<Swatch>,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_tool: Tool::Highlighter,
            brush: BrushLimits::default(),
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            swatches: default_swatches(),
        }
    }
}

impl AnnotationConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for malformed JSON or invalid values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.trim().is_empty() {
            return Err(ConfigError::EmptyNamespace);
        }
        if self.swatches.is_empty() {
            return Err(ConfigError::NoSwatches);
        }
        let BrushLimits { default, min, max } = self.brush;
        if !(min > 0.0 && min <= default && default <= max) {
            return Err(ConfigError::BrushLimits { min, default, max });
        }
        Ok(())
    }

    /// Index of the swatch whose pen color is `pen`.
    #[must_use]
    pub fn swatch_index_for_pen(&self, pen: &Color) -> Option<usize> {
        self.swatches.iter().position(|s| s.pen == *pen)
    }
}

fn default_swatches() -> Vec<Swatch> {
    vec![
        Swatch { pen: Color::rgba(230, 184, 0, 1.0), highlight: Color::rgba(255, 255, 0, 0.2) },
        Swatch { pen: Color::rgba(46, 125, 50, 1.0), highlight: Color::rgba(0, 255, 0, 0.2) },
        Swatch { pen: Color::rgba(194, 24, 91, 1.0), highlight: Color::rgba(255, 105, 180, 0.2) },
        Swatch { pen: Color::rgba(21, 101, 192, 1.0), highlight: Color::rgba(0, 191, 255, 0.2) },
    ]
}
