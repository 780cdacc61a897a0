//! Browser `localStorage` backend.
//!
//! TRADE-OFFS
//! ==========
//! Storage can be missing (privacy modes) or full. Reads degrade to absent
//! and failed writes are logged and dropped; the page keeps working with
//! values that simply do not persist.

use super::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Bind to `window.localStorage`, or to nothing when it is unavailable.
    #[must_use]
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; persisted values will not survive reloads");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            log::warn!("localStorage write for {key} failed: {err:?}");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.remove_item(key);
        }
    }
}
