//! Light/dark theme preference.
//!
//! The saved preference lives under `theme` in local storage and is applied
//! as a `data-theme` attribute on the `<html>` element. Only an explicit
//! saved value is honored; with nothing saved the stylesheet's default
//! (light) wins.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::store::{KeyValueStore, StorageAdapter};

/// Storage key for the saved theme.
pub const STORAGE_KEY: &str = "theme";
/// Attribute on the root element the stylesheet keys off.
pub const ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored or attribute value. Anything but `light`/`dark` is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class for the toggle button: the sun offers a way out of dark.
    #[must_use]
    pub fn icon_class(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }
}

/// Read the saved theme, if any.
pub fn read_preference<S: KeyValueStore>(storage: &StorageAdapter<S>) -> Option<Theme> {
    Theme::parse(&storage.get(STORAGE_KEY)?)
}

pub fn save_preference<S: KeyValueStore>(storage: &StorageAdapter<S>, theme: Theme) {
    storage.set(STORAGE_KEY, theme.as_str());
}
