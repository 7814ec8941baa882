//! Time utilities: "today" and "now" in the user's zone, lenient date input.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Local wall-clock time for `now_utc` in an IANA zone like "Asia/Karachi".
pub fn local_now_in(tz: &str, now_utc: DateTime<Utc>) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(now_utc.with_timezone(&tz).naive_local())
}

/// Current wall-clock time, in `tz` when given, else the system zone.
pub fn local_now(tz: Option<&str>) -> Result<NaiveDateTime> {
    match tz {
        Some(tz) => local_now_in(tz, Utc::now()),
        None => Ok(Local::now().naive_local()),
    }
}

/// Today's calendar date, in `tz` when given, else the system zone.
pub fn today(tz: Option<&str>) -> Result<NaiveDate> {
    Ok(local_now(tz)?.date())
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| anyhow::anyhow!("invalid date '{s}' (expected YYYY-MM-DD): {e}"))
}

/// `YYYY-MM-DD`, falling back to `fallback` for empty or malformed input.
pub fn parse_date_or(s: &str, fallback: NaiveDate) -> NaiveDate {
    match parse_date(s) {
        Ok(date) => date,
        Err(err) => {
            if !s.trim().is_empty() {
                tracing::debug!(error = %err, "using fallback date");
            }
            fallback
        }
    }
}
