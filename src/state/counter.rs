//! Persisted daily counter behind the project like counts.
//!
//! DESIGN
//! ======
//! A record is two string entries: the count under its value key and the
//! last-updated date (ISO `YYYY-MM-DD`) under a companion date key. Each
//! observation credits one unit per whole calendar day elapsed since the
//! stored date, then moves the date forward. Same-day observations are
//! idempotent and a clock that moves backwards credits nothing.
//!
//! A missing or malformed record (non-numeric count, unparseable date) is
//! reseeded from the caller's seed function.

#[cfg(test)]
#[path = "counter_test.rs"]
mod counter_test;

use time::Date;
use time::macros::format_description;

use crate::store::{KeyValueStore, StorageAdapter};

/// Smallest first-observation seed.
pub const SEED_MIN: u32 = 20;
/// Largest first-observation seed.
pub const SEED_MAX: u32 = 31;

/// Storage keys for one counted entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterKey {
    value: String,
    date: String,
}

impl CounterKey {
    /// Key `key` with its date stored under `{key}_date`.
    pub fn new(key: impl Into<String>) -> Self {
        let value = key.into();
        let date = format!("{value}_date");
        Self { value, date }
    }

    /// Keys for the like counter of the `index`-th project card.
    #[must_use]
    pub fn project_like(index: usize) -> Self {
        Self { value: format!("project_like_{index}"), date: format!("project_like_date_{index}") }
    }

    pub fn value_key(&self) -> &str {
        &self.value
    }

    pub fn date_key(&self) -> &str {
        &self.date
    }
}

/// A decoded counter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterRecord {
    pub value: u32,
    pub last_updated: Date,
}

impl CounterRecord {
    /// Read a record, treating any malformed half as a missing record.
    pub fn load<S: KeyValueStore>(storage: &StorageAdapter<S>, key: &CounterKey) -> Option<Self> {
        let value = storage.get_parsed::<u32>(key.value_key())?;
        let last_updated = parse_date(&storage.get(key.date_key())?)?;
        Some(Self { value, last_updated })
    }

    pub fn store<S: KeyValueStore>(&self, storage: &StorageAdapter<S>, key: &CounterKey) {
        storage.set_display(key.value_key(), self.value);
        storage.set(key.date_key(), &format_date(self.last_updated));
    }
}

/// Accrues one count per elapsed calendar day for each key.
pub struct DailyCounter<'a, S> {
    storage: &'a StorageAdapter<S>,
}

impl<'a, S: KeyValueStore> DailyCounter<'a, S> {
    pub fn new(storage: &'a StorageAdapter<S>) -> Self {
        Self { storage }
    }

    /// Observe `key` on `today` and return its current count.
    ///
    /// `seed` is only called when the record is absent or malformed.
    pub fn observe(&self, key: &CounterKey, today: Date, seed: impl FnOnce() -> u32) -> u32 {
        let Some(mut record) = CounterRecord::load(self.storage, key) else {
            let record = CounterRecord { value: seed(), last_updated: today };
            record.store(self.storage, key);
            return record.value;
        };

        let days = days_between(record.last_updated, today);
        if days > 0 {
            record.value = record.value.saturating_add(days);
            record.last_updated = today;
            record.store(self.storage, key);
        }
        record.value
    }
}

/// Whole calendar days from `from` to `to`, clamped at zero.
#[must_use]
pub fn days_between(from: Date, to: Date) -> u32 {
    let days = (to - from).whole_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Parse an ISO `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// A like-count seed in `[SEED_MIN, SEED_MAX]`.
#[must_use]
pub fn random_like_seed() -> u32 {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::rng().random_range(SEED_MIN..=SEED_MAX)
    }
    #[cfg(all(target_arch = "wasm32", feature = "hydrate"))]
    {
        let span = f64::from(SEED_MAX - SEED_MIN + 1);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = (js_sys::Math::random() * span).floor() as u32;
        (SEED_MIN + offset).min(SEED_MAX)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "hydrate")))]
    {
        (SEED_MIN + SEED_MAX) / 2
    }
}
