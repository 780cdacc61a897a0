use super::*;
use crate::store::MemoryStore;
use time::macros::date;

fn adapter() -> StorageAdapter<MemoryStore> {
    StorageAdapter::new(MemoryStore::new())
}

// =============================================================
// Keys and dates
// =============================================================

#[test]
fn project_like_keys_match_page_layout() {
    let key = CounterKey::project_like(3);
    assert_eq!(key.value_key(), "project_like_3");
    assert_eq!(key.date_key(), "project_like_date_3");
}

#[test]
fn generic_key_uses_date_suffix() {
    let key = CounterKey::new("visits");
    assert_eq!(key.date_key(), "visits_date");
}

#[test]
fn parse_and_format_date_agree() {
    let d = date!(2024 - 01 - 05);
    assert_eq!(format_date(d), "2024-01-05");
    assert_eq!(parse_date("2024-01-05"), Some(d));
    assert_eq!(parse_date("not a date"), None);
    assert_eq!(parse_date("2024-13-01"), None);
}

#[test]
fn days_between_clamps_negative() {
    assert_eq!(days_between(date!(2024 - 01 - 10), date!(2024 - 01 - 13)), 3);
    assert_eq!(days_between(date!(2024 - 01 - 10), date!(2024 - 01 - 10)), 0);
    assert_eq!(days_between(date!(2024 - 01 - 10), date!(2024 - 01 - 01)), 0);
    assert_eq!(days_between(date!(2023 - 12 - 31), date!(2024 - 03 - 01)), 61);
}

// =============================================================
// observe
// =============================================================

#[test]
fn first_observation_seeds_and_persists() {
    let storage = adapter();
    let key = CounterKey::project_like(0);
    let value = DailyCounter::new(&storage).observe(&key, date!(2024 - 01 - 10), || 25);
    assert_eq!(value, 25);
    assert_eq!(storage.get("project_like_0").as_deref(), Some("25"));
    assert_eq!(storage.get("project_like_date_0").as_deref(), Some("2024-01-10"));
}

#[test]
fn end_to_end_three_days_later() {
    let storage = adapter();
    let key = CounterKey::project_like(0);
    let counter = DailyCounter::new(&storage);
    assert_eq!(counter.observe(&key, date!(2024 - 01 - 10), || 25), 25);
    let value = counter.observe(&key, date!(2024 - 01 - 13), || panic!("seed must not be called"));
    assert_eq!(value, 28);
    assert_eq!(storage.get("project_like_0").as_deref(), Some("28"));
    assert_eq!(storage.get("project_like_date_0").as_deref(), Some("2024-01-13"));
}

#[test]
fn increment_equals_days_passed() {
    for days in 0..40_i64 {
        let storage = adapter();
        let key = CounterKey::new("k");
        let counter = DailyCounter::new(&storage);
        let start = date!(2024 - 02 - 20);
        counter.observe(&key, start, || 20);
        let later = start + time::Duration::days(days);
        let value = counter.observe(&key, later, || 0);
        assert_eq!(i64::from(value), 20 + days, "after {days} days");
    }
}

#[test]
fn same_day_observations_are_idempotent() {
    let storage = adapter();
    let key = CounterKey::project_like(1);
    let counter = DailyCounter::new(&storage);
    counter.observe(&key, date!(2024 - 05 - 01), || 30);
    let first = counter.observe(&key, date!(2024 - 05 - 04), || 0);
    let snapshot = (storage.get("project_like_1"), storage.get("project_like_date_1"));
    let second = counter.observe(&key, date!(2024 - 05 - 04), || 0);
    assert_eq!(first, 33);
    assert_eq!(first, second);
    assert_eq!(snapshot, (storage.get("project_like_1"), storage.get("project_like_date_1")));
}

#[test]
fn clock_regression_never_decrements() {
    let storage = adapter();
    let key = CounterKey::project_like(2);
    let counter = DailyCounter::new(&storage);
    counter.observe(&key, date!(2024 - 06 - 10), || 22);
    let value = counter.observe(&key, date!(2024 - 06 - 01), || 0);
    assert_eq!(value, 22);
    assert_eq!(storage.get("project_like_date_2").as_deref(), Some("2024-06-10"));
}

#[test]
fn malformed_value_reseeds() {
    let storage = StorageAdapter::new(MemoryStore::with_entries([
        ("project_like_0", "NaN"),
        ("project_like_date_0", "2024-01-01"),
    ]));
    let value = DailyCounter::new(&storage).observe(&CounterKey::project_like(0), date!(2024 - 01 - 09), || 21);
    assert_eq!(value, 21);
    assert_eq!(storage.get("project_like_date_0").as_deref(), Some("2024-01-09"));
}

#[test]
fn malformed_or_missing_date_reseeds() {
    let storage = StorageAdapter::new(MemoryStore::with_entries([
        ("project_like_0", "40"),
        ("project_like_date_0", "yesterday"),
        ("project_like_1", "40"),
    ]));
    let counter = DailyCounter::new(&storage);
    assert_eq!(counter.observe(&CounterKey::project_like(0), date!(2024 - 01 - 09), || 24), 24);
    assert_eq!(counter.observe(&CounterKey::project_like(1), date!(2024 - 01 - 09), || 26), 26);
}

#[test]
fn keys_are_independent() {
    let storage = adapter();
    let counter = DailyCounter::new(&storage);
    counter.observe(&CounterKey::project_like(0), date!(2024 - 01 - 01), || 20);
    counter.observe(&CounterKey::project_like(1), date!(2024 - 01 - 05), || 30);
    assert_eq!(counter.observe(&CounterKey::project_like(0), date!(2024 - 01 - 05), || 0), 24);
    assert_eq!(counter.observe(&CounterKey::project_like(1), date!(2024 - 01 - 05), || 0), 30);
}

#[test]
fn random_seed_stays_in_range() {
    for _ in 0..500 {
        let seed = random_like_seed();
        assert!((SEED_MIN..=SEED_MAX).contains(&seed), "seed {seed} out of range");
    }
}

#[test]
fn first_observation_with_random_seed_is_in_range() {
    let storage = adapter();
    let value = DailyCounter::new(&storage).observe(&CounterKey::new("k"), date!(2024 - 01 - 01), random_like_seed);
    assert!((SEED_MIN..=SEED_MAX).contains(&value));
}
