//! Key-value storage adapter.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page persists a handful of string values (like counters, theme). The
//! [`KeyValueStore`] trait is the seam to the backend: `localStorage` in the
//! browser, [`MemoryStore`] everywhere else. [`StorageAdapter`] adds an
//! optional key prefix and typed read/write on top.
//!
//! Absence is never an error. A value that does not parse is reported as
//! absent, so callers reseed instead of failing.


#[cfg(feature = "hydrate")]
pub mod local;
pub mod memory;

use std::borrow::Cow;
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;

pub use memory::MemoryStore;

/// A string-keyed, string-valued store with no transactional guarantees.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// Typed access to a [`KeyValueStore`], optionally scoped by a key prefix.
#[derive(Debug, Clone, Default)]
pub struct StorageAdapter<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    /// Unscoped adapter: keys are passed through unchanged.
    pub fn new(store: S) -> Self {
        Self { store, prefix: String::new() }
    }

    /// Adapter whose keys are all stored as `{prefix}{key}`.
    pub fn scoped(store: S, prefix: impl Into<String>) -> Self {
        Self { store, prefix: prefix.into() }
    }

    fn full_key<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.prefix.is_empty() {
            Cow::Borrowed(key)
        } else {
            Cow::Owned(format!("{}{key}", self.prefix))
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(&self.full_key(key))
    }

    pub fn set(&self, key: &str, value: &str) {
        self.store.set(&self.full_key(key), value);
    }

    pub fn remove(&self, key: &str) {
        self.store.remove(&self.full_key(key));
    }

    /// Read and parse `key`. Absent and unparseable values are both `None`.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key)?.trim().parse().ok()
    }

    pub fn set_display<T: Display>(&self, key: &str, value: T) {
        self.set(key, &value.to_string());
    }
}
