use super::*;
use base64::Engine as _;
use crate::consts::PNG_DATA_URI_PREFIX;

impl Snapshot {
    /// A fully transparent snapshot.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self { width, height, pixels: vec![0; byte_len(width, height)] }
    }

    /// Whether every pixel is fully transparent.
    pub(crate) fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }
}

fn checker(width: u32, height: u32) -> Snapshot {
    let mut pixels = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if (x + y) % 2 == 0 {
                pixels.extend_from_slice(&[255, 255, 0, 51]);
            } else {
                pixels.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    Snapshot::new(width, height, pixels).unwrap()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_rejects_wrong_buffer_length() {
    let err = Snapshot::new(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, SnapshotError::SizeMismatch { expected: 16, actual: 15 }));
}

#[test]
fn blank_is_blank() {
    let snap = Snapshot::blank(3, 2);
    assert!(snap.is_blank());
    assert_eq!(snap.pixels().len(), 24);
}

#[test]
fn pixel_lookup_and_bounds() {
    let snap = checker(2, 2);
    assert_eq!(snap.pixel(0, 0), Some([255, 255, 0, 51]));
    assert_eq!(snap.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(snap.pixel(2, 0), None);
    assert_eq!(snap.alpha(5, 5), 0);
    assert!(!snap.is_blank());
}

// =============================================================
// Data URI codec
// =============================================================

#[test]
fn data_uri_has_png_prefix() {
    let uri = checker(4, 4).to_data_uri().unwrap();
    assert!(uri.starts_with(PNG_DATA_URI_PREFIX));
}

#[test]
fn data_uri_preserves_translucent_pixels_exactly() {
    let snap = checker(5, 3);
    let decoded = Snapshot::from_data_uri(&snap.to_data_uri().unwrap()).unwrap();
    assert_eq!(decoded, snap);
}

#[test]
fn from_data_uri_rejects_plain_text() {
    assert!(matches!(Snapshot::from_data_uri("not an image"), Err(SnapshotError::NotDataUri)));
}

#[test]
fn from_data_uri_rejects_non_base64_header() {
    assert!(matches!(Snapshot::from_data_uri("data:image/png,abc"), Err(SnapshotError::NotDataUri)));
}

#[test]
fn from_data_uri_rejects_bad_base64() {
    let result = Snapshot::from_data_uri("data:image/png;base64,@@@@");
    assert!(matches!(result, Err(SnapshotError::Base64(_))));
}

#[test]
fn from_data_uri_rejects_non_png_bytes() {
    let uri = format!("{PNG_DATA_URI_PREFIX}{}", STANDARD.encode(b"definitely not a png"));
    assert!(matches!(Snapshot::from_data_uri(&uri), Err(SnapshotError::Image(_))));
}
