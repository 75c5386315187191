//! `window.localStorage` as the annotation key-value store.
//!
//! When storage is unavailable (private mode, sandboxed iframe) the session
//! falls back to an in-memory store: annotations work but are not kept.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use canvas::store::{KeyValueStore, MemoryStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// The window's local storage, if the page may use it.
    #[must_use]
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                log::warn!("localStorage access denied: {err:?}");
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("localStorage read of {key} failed: {err:?}");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|err| classify(key, value.len(), &err))
    }

    fn remove(&mut self, key: &str) {
        if let Err(err) = self.storage.remove_item(key) {
            log::warn!("localStorage remove of {key} failed: {err:?}");
        }
    }
}

/// Local storage when available, otherwise a session-only memory store.
#[must_use]
pub fn open_store() -> Box<dyn KeyValueStore> {
    if let Some(storage) = LocalStorage::open() {
        return Box::new(storage);
    }
    log::warn!("localStorage unavailable; annotations will not outlive this page");
    Box::new(MemoryStore::new())
}

fn classify(key: &str, bytes: usize, err: &JsValue) -> StoreError {
    let name = err.dyn_ref::<DomException>().map(DomException::name);
    if name.as_deref().is_some_and(is_quota_error) {
        StoreError::QuotaExceeded { key: key.to_string(), bytes }
    } else {
        StoreError::Backend(format!("{err:?}"))
    }
}

/// DOMException names browsers use for a full storage area.
#[must_use]
pub fn is_quota_error(name: &str) -> bool {
    matches!(name, "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED")
}
