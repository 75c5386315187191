//! Annotation persistence: one raster snapshot per page.
//!
//! [`KeyValueStore`] is the host's string store (`localStorage` in the
//! browser, [`MemoryStore`] elsewhere). [`AnnotationStore`] layers the page
//! key scheme and snapshot codec on top. Neither save nor load ever reports
//! an error to its caller: a failed save loses that stroke's persistence, and
//! an unreadable entry is treated as absent and removed.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::raster::{Raster, RasterError};
use crate::snapshot::Snapshot;
use crate::surface::PageId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store refused the write because it is full.
    #[error("storage quota exceeded writing {key} ({bytes} bytes)")]
    QuotaExceeded { key: String, bytes: usize },
    /// The backing store failed for another reason.
    #[error("storage backend error: {0}")]
    Backend(String),
    /// The surface could not be encoded.
    #[error("failed to encode surface: {0}")]
    Encode(#[from] RasterError),
}

/// A persistent string key-value store.
pub trait KeyValueStore {
    /// Read the value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write is rejected (quota, backend).
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Missing keys are ignored.
    fn remove(&mut self, key: &str);
}

/// In-memory store with an optional byte quota.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys plus values exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self { entries: HashMap::new(), quota: Some(bytes) }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let bytes = key.len() + value.len();
            if self.used_bytes_without(key) + bytes > quota {
                return Err(StoreError::QuotaExceeded { key: key.to_string(), bytes });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Page-keyed snapshot persistence over a [`KeyValueStore`].
pub struct AnnotationStore {
    kv: Box<dyn KeyValueStore>,
    namespace: String,
}

impl AnnotationStore {
    #[must_use]
    pub fn new(kv: Box<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self { kv, namespace: namespace.into() }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Storage key for a page's snapshot: `<namespace>-highlights-page-<page>`.
    #[must_use]
    pub fn key(&self, page: PageId) -> String {
        format!("{}-highlights-page-{page}", self.namespace)
    }

    /// Encode `raster` and write it under `page`'s key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when encoding or the write fails.
    pub fn try_save(&mut self, page: PageId, raster: &dyn Raster) -> Result<(), StoreError> {
        let encoded = raster.encode()?;
        self.kv.set(&self.key(page), &encoded)
    }

    /// Persist `raster` for `page`, logging instead of failing.
    ///
    /// Returns whether the snapshot was written.
    pub fn save(&mut self, page: PageId, raster: &dyn Raster) -> bool {
        match self.try_save(page, raster) {
            Ok(()) => {
                log::debug!("saved annotations for page {page}");
                true
            }
            Err(err) => {
                log::error!("save annotations for page {page} failed: {err}");
                false
            }
        }
    }

    /// Read and decode `page`'s snapshot.
    ///
    /// Undecodable entries are removed and reported as absent.
    pub fn load(&mut self, page: PageId) -> Option<Snapshot> {
        let key = self.key(page);
        let raw = self.kv.get(&key)?;
        match Snapshot::from_data_uri(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("discarding unreadable annotations for page {page}: {err}");
                self.kv.remove(&key);
                None
            }
        }
    }

    /// Remove `page`'s persisted snapshot.
    pub fn clear(&mut self, page: PageId) {
        self.kv.remove(&self.key(page));
    }

    /// The underlying key-value store, shared with preferences.
    pub fn kv_mut(&mut self) -> &mut dyn KeyValueStore {
        self.kv.as_mut()
    }
}
