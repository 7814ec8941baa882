//! Record key generation.
//!
//! Keys are `<prefix>_<YYYYMMDDHHMMSS>`. Second resolution alone collides when two
//! records are created within the same second, so [`unique_key`] appends a counter
//! (`_2`, `_3`, ...) until the key is unused.

use chrono::NaiveDateTime;
use std::collections::BTreeSet;

pub const HISTORY_KEY_PREFIX: &str = "calc";
pub const REMINDER_KEY_PREFIX: &str = "reminder";

const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Timestamp-only key. Not unique on its own.
pub fn timestamp_key(prefix: &str, at: NaiveDateTime) -> String {
    format!("{}_{}", prefix, at.format(KEY_TIMESTAMP_FORMAT))
}

/// Timestamp key disambiguated against `existing`.
pub fn unique_key(prefix: &str, at: NaiveDateTime, existing: &BTreeSet<String>) -> String {
    let base = timestamp_key(prefix, at);
    if !existing.contains(&base) {
        return base;
    }
    let mut n = 2u64;
    loop {
        let candidate = format!("{base}_{n}");
        if !existing.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(8, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_timestamp_key_format() {
        assert_eq!(timestamp_key(HISTORY_KEY_PREFIX, at()), "calc_20261016080509");
        assert_eq!(
            timestamp_key(REMINDER_KEY_PREFIX, at()),
            "reminder_20261016080509"
        );
    }

    #[test]
    fn test_timestamp_key_collides_within_a_second() {
        let later_same_second = at() + chrono::Duration::milliseconds(400);
        assert_eq!(
            timestamp_key(HISTORY_KEY_PREFIX, at()),
            timestamp_key(HISTORY_KEY_PREFIX, later_same_second)
        );
    }

    #[test]
    fn test_unique_key_free_slot_keeps_base() {
        assert_eq!(
            unique_key(HISTORY_KEY_PREFIX, at(), &BTreeSet::new()),
            "calc_20261016080509"
        );
    }

    #[test]
    fn test_unique_key_appends_counter() {
        let mut existing = BTreeSet::new();
        let first = unique_key(HISTORY_KEY_PREFIX, at(), &existing);
        existing.insert(first.clone());
        let second = unique_key(HISTORY_KEY_PREFIX, at(), &existing);
        existing.insert(second.clone());
        let third = unique_key(HISTORY_KEY_PREFIX, at(), &existing);

        assert_ne!(first, second);
        assert_eq!(second, "calc_20261016080509_2");
        assert_eq!(third, "calc_20261016080509_3");
    }
}
