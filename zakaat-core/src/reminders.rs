//! Recurring Zakaat reminders as persisted in the `reminders` collection.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a reminder repeats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ReminderKind {
    #[default]
    Annual,
    Monthly,
    /// Fixed weekly interval; there is no user-supplied period yet.
    Custom,
}

impl ReminderKind {
    /// Days between occurrences
    pub fn interval_days(&self) -> i64 {
        match self {
            ReminderKind::Annual => 365,
            ReminderKind::Monthly => 30,
            ReminderKind::Custom => 7,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::days(self.interval_days())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Annual => "Annual",
            ReminderKind::Monthly => "Monthly",
            ReminderKind::Custom => "Custom",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annual" => Ok(ReminderKind::Annual),
            "monthly" => Ok(ReminderKind::Monthly),
            "custom" => Ok(ReminderKind::Custom),
            other => Err(format!(
                "unknown reminder type '{other}' (expected annual, monthly or custom)"
            )),
        }
    }
}

/// A stored reminder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderRecord {
    /// Store key; not part of the persisted body
    #[serde(skip)]
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub start_date: NaiveDate,
    /// Next day the reminder fires
    pub next_date: NaiveDate,
    /// Empty when the user gave no note
    #[serde(default)]
    pub note: String,
}

impl ReminderRecord {
    /// New reminder; first occurrence is one interval after `start_date`.
    pub fn new(
        key: impl Into<String>,
        kind: ReminderKind,
        start_date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            kind,
            start_date,
            next_date: start_date + kind.interval(),
            note: note.into().trim().to_string(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn note(&self) -> Option<&str> {
        let note = self.note.trim();
        if note.is_empty() { None } else { Some(note) }
    }

    /// Move `next_date` forward by one interval
    pub fn advance(&mut self) {
        self.next_date = self.next_date + self.kind.interval();
    }

    /// Text shown when the reminder fires
    pub fn notification_message(&self) -> String {
        match self.note() {
            Some(note) => format!("Zakaat Reminder: {note}"),
            None => "Zakaat Reminder".to_string(),
        }
    }

    /// One-line listing: `Annual - Next: 2027-01-01 - pay before Ramadan`
    pub fn summary_line(&self) -> String {
        format!(
            "{} - Next: {} - {}",
            self.kind,
            self.next_date.format("%Y-%m-%d"),
            self.note.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_reminder_next_date_is_one_interval_out() {
        let start = d(2026, 1, 1);
        let next = |kind| ReminderRecord::new("k", kind, start, "").next_date;
        assert_eq!(next(ReminderKind::Annual), d(2027, 1, 1));
        assert_eq!(next(ReminderKind::Monthly), d(2026, 1, 31));
        assert_eq!(next(ReminderKind::Custom), d(2026, 1, 8));
    }

    #[test]
    fn test_annual_interval_is_365_days_even_in_leap_years() {
        let r = ReminderRecord::new("k", ReminderKind::Annual, d(2028, 1, 1), "");
        assert_eq!(r.next_date, d(2028, 12, 31));
    }

    #[test]
    fn test_notification_message_with_and_without_note() {
        let mut r =
            ReminderRecord::new("k", ReminderKind::Annual, d(2026, 1, 1), "  pay at the mosque ");
        assert_eq!(r.notification_message(), "Zakaat Reminder: pay at the mosque");
        r.note = String::new();
        assert_eq!(r.notification_message(), "Zakaat Reminder");
    }

    #[test]
    fn test_parse_kind_case_insensitive() {
        assert_eq!("annual".parse::<ReminderKind>().unwrap(), ReminderKind::Annual);
        assert_eq!("Monthly".parse::<ReminderKind>().unwrap(), ReminderKind::Monthly);
        assert_eq!(" CUSTOM ".parse::<ReminderKind>().unwrap(), ReminderKind::Custom);
        assert!("weekly".parse::<ReminderKind>().is_err());
    }

    #[test]
    fn test_persisted_shape_matches_store_layout() {
        let r = ReminderRecord::new("reminder_1", ReminderKind::Monthly, d(2026, 2, 1), "note");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "type": "Monthly",
                "start_date": "2026-02-01",
                "next_date": "2026-03-03",
                "note": "note"
            })
        );
    }

    #[test]
    fn test_decode_without_note() {
        let json = r#"{"type":"Custom","start_date":"2026-02-01","next_date":"2026-02-08"}"#;
        let r: ReminderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.kind, ReminderKind::Custom);
        assert_eq!(r.note(), None);
    }

    #[test]
    fn test_summary_line_format() {
        let r = ReminderRecord::new("k", ReminderKind::Annual, d(2026, 1, 1), "before Ramadan");
        assert_eq!(r.summary_line(), "Annual - Next: 2027-01-01 - before Ramadan");
    }
}
