//! Tool state: the active tool, swatch and brush size, and the stroke style
//! they resolve to.
//!
//! [`ToolConfig::style`] is the single place where a tool becomes drawing
//! parameters. The drawing engine latches its result at stroke start, so tool
//! or swatch changes mid-stroke never affect the stroke in flight.

#[cfg(test)]
#[path = "tool_test.rs"]
mod tool_test;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::PEN_WIDTH_DIVISOR;

/// Which annotation tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Thin opaque freehand ink.
    #[serde(rename = "pen")]
    Pen,
    /// Wide translucent straight mark from press point to release point.
    #[default]
    #[serde(rename = "highlight")]
    Highlighter,
    /// Removes pixels along a freehand path.
    #[serde(rename = "eraser")]
    Eraser,
}

impl Tool {
    /// Stored name, shared with the preference store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pen => "pen",
            Self::Highlighter => "highlight",
            Self::Eraser => "eraser",
        }
    }

    /// Parse a stored tool name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "pen" => Some(Self::Pen),
            "highlight" | "highlighter" => Some(Self::Highlighter),
            "eraser" => Some(Self::Eraser),
            _ => None,
        }
    }

    /// Whether the tool draws incrementally as the pointer moves.
    #[must_use]
    pub fn is_freehand(self) -> bool {
        matches!(self, Self::Pen | Self::Eraser)
    }
}

/// Pixel-combination rule for a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Normal alpha blending over existing pixels.
    SourceOver,
    /// Removes existing pixels where the stroke covers them.
    DestinationOut,
}

impl CompositeMode {
    /// Canvas2D `globalCompositeOperation` name.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::SourceOver => "source-over",
            Self::DestinationOut => "destination-out",
        }
    }
}

/// A pen/highlighter color pair shown as one swatch in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    /// Opaque ink color for the pen.
    pub pen: Color,
    /// Translucent color for the highlighter.
    pub highlight: Color,
}

/// Fully resolved drawing parameters for one stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub mode: CompositeMode,
    /// `None` for the eraser, which ignores color.
    pub color: Option<Color>,
    /// Line width in bitmap pixels.
    pub width: f64,
}

/// Active tool configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub tool: Tool,
    /// Index of the active swatch in the configured palette.
    pub swatch_index: usize,
    pub swatch: Swatch,
    /// Shared brush scalar; see [`ToolConfig::style`] for how each tool uses it.
    pub brush_size: f64,
}

impl ToolConfig {
    /// Resolve the current tool into compositing mode, color and width.
    #[must_use]
    pub fn style(&self) -> StrokeStyle {
        match self.tool {
            Tool::Pen => StrokeStyle {
                mode: CompositeMode::SourceOver,
                color: Some(self.swatch.pen),
                width: self.brush_size / PEN_WIDTH_DIVISOR,
            },
            Tool::Highlighter => StrokeStyle {
                mode: CompositeMode::SourceOver,
                color: Some(self.swatch.highlight),
                width: self.brush_size,
            },
            Tool::Eraser => StrokeStyle { mode: CompositeMode::DestinationOut, color: None, width: self.brush_size },
        }
    }
}

/// Pointer cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Annotation mode is off.
    Default,
    /// Pen.
    Crosshair,
    /// Highlighter cursor class.
    Highlighter,
    /// Eraser cursor class.
    Eraser,
}

impl Cursor {
    /// Cursor for the given mode and tool.
    #[must_use]
    pub fn for_tool(mode_enabled: bool, tool: Tool) -> Self {
        if !mode_enabled {
            return Self::Default;
        }
        match tool {
            Tool::Pen => Self::Crosshair,
            Tool::Highlighter => Self::Highlighter,
            Tool::Eraser => Self::Eraser,
        }
    }

    /// CSS class applied to the surface element, if any.
    #[must_use]
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Highlighter => Some("highlight-cursor"),
            Self::Eraser => Some("eraser-cursor"),
            Self::Default | Self::Crosshair => None,
        }
    }

    /// Inline `cursor` style value; empty when a class provides it.
    #[must_use]
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Highlighter | Self::Eraser => "",
        }
    }
}
