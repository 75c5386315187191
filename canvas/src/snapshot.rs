//! Raster snapshots and their portable encoding.
//!
//! A [`Snapshot`] is a straight-alpha RGBA8 copy of a surface, laid out like
//! Canvas2D `ImageData`. Stored snapshots are PNG files wrapped in a base64
//! data URI, the same form `HTMLCanvasElement.toDataURL()` produces, so either
//! raster backend can read what the other wrote.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};

use crate::consts::PNG_DATA_URI_PREFIX;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The stored value is not a base64 data URI.
    #[error("not a base64 data URI")]
    NotDataUri,
    /// The data URI payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// PNG encoding or decoding failed.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),
    /// The pixel buffer does not match the declared dimensions.
    #[error("pixel buffer is {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// A straight-alpha RGBA8 raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Snapshot {
    /// Wrap an RGBA8 buffer of `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::SizeMismatch`] when the buffer length is wrong.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SnapshotError> {
        let expected = byte_len(width, height);
        if pixels.len() != expected {
            return Err(SnapshotError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The RGBA value at `(x, y)`, if inside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Alpha at `(x, y)`, or 0 outside the raster.
    #[must_use]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |p| p[3])
    }

    /// Encode as a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Image`] if PNG encoding fails.
    pub fn to_data_uri(&self) -> Result<String, SnapshotError> {
        let expected = byte_len(self.width, self.height);
        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(SnapshotError::SizeMismatch { expected, actual: self.pixels.len() })?;
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(&png)))
    }

    /// Decode a base64 data URI holding a PNG image.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the URI, base64 payload or PNG is invalid.
    pub fn from_data_uri(uri: &str) -> Result<Self, SnapshotError> {
        let payload = data_uri_payload(uri).ok_or(SnapshotError::NotDataUri)?;
        let bytes = STANDARD.decode(payload)?;
        let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)?.to_rgba8();
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw())
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn data_uri_payload(uri: &str) -> Option<&str> {
    let rest = uri.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    header.ends_with(";base64").then_some(payload)
}
