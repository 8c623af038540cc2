//! Date and identifier helpers shared by every collection.
//!
//! Calendar days travel as `YYYY-MM-DD` strings and times of day as 24-hour
//! `HH:MM`; these are the join keys between progress records and the
//! calendar, so all formatting goes through here.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use uuid::Uuid;

use crate::error::ValidationError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Opaque, practically-unique identifier for a new record.
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `HH:MM` of an instant, as seen in `tz`.
pub fn format_time<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format(TIME_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|e| ValidationError::InvalidValue {
        field: "date".into(),
        message: format!("expected YYYY-MM-DD, got '{s}' ({e})"),
    })
}

pub fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|e| ValidationError::InvalidValue {
        field: "time".into(),
        message: format!("expected HH:MM, got '{s}' ({e})"),
    })
}

/// Combine a calendar day and a wall-clock time in `tz` into an instant.
///
/// Seconds are zeroed. A wall-clock time skipped by a DST jump resolves to
/// the earliest valid mapping one hour later.
pub fn combine<Tz: TimeZone>(
    date: NaiveDate,
    time: NaiveTime,
    tz: &Tz,
) -> Result<DateTime<Utc>, ValidationError> {
    let time = time.with_second(0).unwrap_or(time);
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidValue {
            field: "time".into(),
            message: format!("{naive} does not exist in the local time zone"),
        })
}

/// The `n` calendar days ending on `reference`, oldest first.
pub fn days_ending_on(reference: NaiveDate, n: u32) -> Vec<NaiveDate> {
    (0..n)
        .rev()
        .filter_map(|back| reference.checked_sub_signed(Duration::days(i64::from(back))))
        .collect()
}

/// Monday through Sunday of the week containing `date`.
pub fn week_of(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = date.week(chrono::Weekday::Mon).first_day();
    monday.iter_days().take(7).collect()
}
