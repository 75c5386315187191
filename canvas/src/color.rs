//! CSS color parsing for swatch colors.
//!
//! Swatches are configured with CSS strings (`#rgb`, `#rrggbb`, `rgb(...)`,
//! `rgba(...)`). The Canvas2D backend wants a CSS string back, the software
//! backend wants straight RGBA channels; [`Color`] carries both views.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string is not a recognized CSS color form.
    #[error("unsupported color syntax: {0:?}")]
    Syntax(String),
    /// A channel is outside its valid range.
    #[error("color channel out of range in {0:?}")]
    Range(String),
}

/// A straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f64,
}

impl Color {
    pub const OPAQUE_BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };

    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    /// Parse a CSS color string.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] for unsupported syntax or out-of-range channels.
    pub fn parse(raw: &str) -> Result<Self, ColorError> {
        let trimmed = raw.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::Syntax(raw.to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ColorError::Syntax(raw.to_string()))?;
        parse_functional(args, raw)
    }

    /// Alpha as an 8-bit channel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Whether the color is fully opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Canonical CSS form: `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_css()
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16);
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2));
            let g = channel(&hex[1..2].repeat(2));
            let b = channel(&hex[2..3].repeat(2));
            match (r, g, b) {
                (Ok(r), Ok(g), Ok(b)) => Some(Color::rgba(r, g, b, 1.0)),
                _ => None,
            }
        }
        6 => match (channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])) {
            (Ok(r), Ok(g), Ok(b)) => Some(Color::rgba(r, g, b, 1.0)),
            _ => None,
        },
        _ => None,
    }
}

fn parse_functional(args: &str, raw: &str) -> Result<Color, ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorError::Syntax(raw.to_string()));
    }
    let mut rgb = [0_u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        let value: u16 = part.parse().map_err(|_| ColorError::Syntax(raw.to_string()))?;
        *slot = u8::try_from(value).map_err(|_| ColorError::Range(raw.to_string()))?;
    }
    let alpha = match parts.get(3) {
        Some(part) => {
            let a: f64 = part.parse().map_err(|_| ColorError::Syntax(raw.to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorError::Range(raw.to_string()));
            }
            a
        }
        None => 1.0,
    };
    Ok(Color::rgba(rgb[0], rgb[1], rgb[2], alpha))
}
