//! Cross-session tool preferences.
//!
//! The last tool, swatch and brush size are remembered independently of any
//! page. Every value read back is validated against the config; anything
//! unrecognized falls back to the configured default.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use crate::color::Color;
use crate::config::AnnotationConfig;
use crate::store::KeyValueStore;
use crate::tool::{Swatch, Tool, ToolConfig};

/// Remembered tool settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub tool: Tool,
    pub swatch_index: usize,
    pub brush_size: f64,
}

impl Preferences {
    /// The configured defaults, ignoring anything stored.
    #[must_use]
    pub fn defaults(config: &AnnotationConfig) -> Self {
        Self { tool: config.default_tool, swatch_index: 0, brush_size: config.brush.default }
    }

    /// Read stored preferences, falling back per field.
    #[must_use]
    pub fn load(kv: &dyn KeyValueStore, config: &AnnotationConfig) -> Self {
        let defaults = Self::defaults(config);
        let ns = &config.namespace;

        let tool = kv.get(&tool_key(ns)).and_then(|raw| Tool::parse(&raw)).unwrap_or(defaults.tool);

        let swatch_index = kv
            .get(&color_key(ns))
            .and_then(|raw| match Color::parse(&raw) {
                Ok(color) => config.swatch_index_for_pen(&color),
                Err(err) => {
                    log::warn!("ignoring stored color: {err}");
                    None
                }
            })
            .unwrap_or(defaults.swatch_index);

        let brush_size = match kv.get(&brush_key(ns)).map(|raw| raw.trim().parse::<f64>()) {
            Some(Ok(size)) => config.brush.clamp(size),
            Some(Err(err)) => {
                log::warn!("ignoring stored brush size: {err}");
                defaults.brush_size
            }
            None => defaults.brush_size,
        };

        Self { tool, swatch_index, brush_size }
    }

    /// Resolve into a tool configuration against the config palette.
    #[must_use]
    pub fn to_tool_config(&self, config: &AnnotationConfig) -> ToolConfig {
        let swatch_index = self.swatch_index.min(config.swatches.len().saturating_sub(1));
        let swatch = config.swatches.get(swatch_index).copied().unwrap_or_else(fallback_swatch);
        ToolConfig { tool: self.tool, swatch_index, swatch, brush_size: self.brush_size }
    }
}

/// Remember the active tool.
pub fn save_tool(kv: &mut dyn KeyValueStore, namespace: &str, tool: Tool) {
    write(kv, &tool_key(namespace), tool.as_str());
}

/// Remember the active swatch by its pen color.
pub fn save_color(kv: &mut dyn KeyValueStore, namespace: &str, swatch: &Swatch) {
    write(kv, &color_key(namespace), &swatch.pen.to_css());
}

/// Remember the brush size.
pub fn save_brush_size(kv: &mut dyn KeyValueStore, namespace: &str, size: f64) {
    write(kv, &brush_key(namespace), &size.to_string());
}

#[must_use]
pub fn tool_key(namespace: &str) -> String {
    format!("{namespace}-lastDrawMode")
}

#[must_use]
pub fn color_key(namespace: &str) -> String {
    format!("{namespace}-lastColor")
}

#[must_use]
pub fn brush_key(namespace: &str) -> String {
    format!("{namespace}-lastBrushSize")
}

fn write(kv: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(err) = kv.set(key, value) {
        log::warn!("failed to save preference {key}: {err}");
    }
}

// Config validation guarantees a non-empty palette; this only backs the type.
fn fallback_swatch() -> Swatch {
    Swatch { pen: Color::OPAQUE_BLACK, highlight: Color::rgba(255, 255, 0, 0.2) }
}
