//! Recurrence resolution: which events occur on a given calendar day.
//!
//! All comparisons are on calendar days in the caller's time zone, never on
//! elapsed 24h periods. An event anchored on the 31st has no monthly
//! occurrence in shorter months.

use chrono::{Datelike, NaiveDate, TimeZone, Timelike};

use super::event::{Event, RecurrenceKind};

/// Calendar day on which `event` starts, as seen in `tz`.
pub fn start_day<Tz: TimeZone>(event: &Event, tz: &Tz) -> NaiveDate {
    event.start_time.with_timezone(tz).date_naive()
}

/// Whether `event` has an occurrence on `date`.
pub fn occurs_on<Tz: TimeZone>(event: &Event, date: NaiveDate, tz: &Tz) -> bool {
    let start = start_day(event, tz);
    if start == date {
        return true;
    }

    let Some(kind) = event.recurrence() else {
        return false;
    };
    let days_diff = (date - start).num_days();
    if days_diff < 0 {
        return false;
    }

    match kind {
        RecurrenceKind::Daily => true,
        RecurrenceKind::Weekly => days_diff % 7 == 0,
        RecurrenceKind::Monthly => date.day() == start.day(),
    }
}

/// Events visible on `date`, in catalog order.
pub fn events_on<'a, Tz: TimeZone>(events: &'a [Event], date: NaiveDate, tz: &Tz) -> Vec<&'a Event> {
    events.iter().filter(|e| occurs_on(e, date, tz)).collect()
}

/// Events visible on `date` whose start falls in `hour` (0-23) of the day grid.
pub fn events_starting_in_hour<'a, Tz: TimeZone>(
    events: &'a [Event],
    date: NaiveDate,
    hour: u32,
    tz: &Tz,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| occurs_on(e, date, tz))
        .filter(|e| e.start_time.with_timezone(tz).hour() == hour)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, Utc};
    use proptest::prelude::*;

    fn event(start: DateTime<Utc>, recurrence: Option<RecurrenceKind>) -> Event {
        Event {
            id: "e1".into(),
            title: "Event".into(),
            color: "#87CEEB".into(),
            start_time: start,
            end_time: start + Duration::hours(1),
            is_recurring: recurrence.is_some(),
            recurrence_type: recurrence,
            created_at: start,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn one_off_only_on_its_day() {
        let e = event(at(2024, 5, 10, 9), None);
        assert!(occurs_on(&e, day(2024, 5, 10), &Utc));
        assert!(!occurs_on(&e, day(2024, 5, 11), &Utc));
        assert!(!occurs_on(&e, day(2024, 5, 17), &Utc));
    }

    #[test]
    fn daily_from_start_onwards() {
        let e = event(at(2024, 5, 10, 23), Some(RecurrenceKind::Daily));
        assert!(!occurs_on(&e, day(2024, 5, 9), &Utc));
        assert!(occurs_on(&e, day(2024, 5, 10), &Utc));
        assert!(occurs_on(&e, day(2025, 1, 1), &Utc));
    }

    #[test]
    fn late_start_counts_whole_calendar_days() {
        // 23:00 start, next morning is one calendar day later even though
        // fewer than 24 hours separate them.
        let e = event(at(2024, 5, 10, 23), Some(RecurrenceKind::Weekly));
        assert!(occurs_on(&e, day(2024, 5, 17), &Utc));
        assert!(!occurs_on(&e, day(2024, 5, 16), &Utc));
    }

    #[test]
    fn weekly_every_seventh_day() {
        let e = event(at(2024, 1, 1, 9), Some(RecurrenceKind::Weekly));
        assert!(occurs_on(&e, day(2024, 1, 8), &Utc));
        assert!(occurs_on(&e, day(2024, 1, 29), &Utc));
        assert!(!occurs_on(&e, day(2024, 1, 9), &Utc));
        assert!(!occurs_on(&e, day(2023, 12, 25), &Utc));
    }

    #[test]
    fn monthly_matches_day_of_month() {
        let e = event(at(2024, 1, 1, 9), Some(RecurrenceKind::Monthly));
        assert!(occurs_on(&e, day(2024, 2, 1), &Utc));
        assert!(!occurs_on(&e, day(2024, 2, 2), &Utc));
    }

    #[test]
    fn monthly_on_31st_skips_short_months() {
        let e = event(at(2024, 1, 31, 9), Some(RecurrenceKind::Monthly));
        assert!(!occurs_on(&e, day(2024, 2, 29), &Utc));
        assert!(!occurs_on(&e, day(2024, 4, 30), &Utc));
        assert!(occurs_on(&e, day(2024, 3, 31), &Utc));
    }

    #[test]
    fn recurring_flag_without_kind_is_one_off() {
        let mut e = event(at(2024, 1, 1, 9), None);
        e.is_recurring = true;
        assert!(occurs_on(&e, day(2024, 1, 1), &Utc));
        assert!(!occurs_on(&e, day(2024, 1, 2), &Utc));
    }

    #[test]
    fn kind_without_recurring_flag_is_one_off() {
        let mut e = event(at(2024, 1, 1, 9), Some(RecurrenceKind::Daily));
        e.is_recurring = false;
        assert!(!occurs_on(&e, day(2024, 1, 2), &Utc));
    }

    #[test]
    fn calendar_day_follows_time_zone() {
        // 2024-01-01T23:30Z is already Jan 2 at UTC+2.
        let e = event(
            Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap(),
            None,
        );
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert!(occurs_on(&e, day(2024, 1, 2), &plus_two));
        assert!(!occurs_on(&e, day(2024, 1, 1), &plus_two));
    }

    #[test]
    fn hour_bucket_filters_by_local_start_hour() {
        let events = vec![
            event(at(2024, 3, 4, 9), Some(RecurrenceKind::Daily)),
            event(at(2024, 3, 4, 14), None),
        ];
        let nine = events_starting_in_hour(&events, day(2024, 3, 6), 9, &Utc);
        assert_eq!(nine.len(), 1);
        assert!(events_starting_in_hour(&events, day(2024, 3, 6), 14, &Utc).is_empty());
        assert_eq!(events_on(&events, day(2024, 3, 4), &Utc).len(), 2);
    }

    proptest! {
        #[test]
        fn non_recurring_occurs_only_on_start_day(offset in -400i64..400, hour in 0u32..24) {
            let e = event(at(2024, 6, 15, hour), None);
            let target = day(2024, 6, 15) + Duration::days(offset);
            prop_assert_eq!(occurs_on(&e, target, &Utc), offset == 0);
        }

        #[test]
        fn weekly_occurs_iff_nonnegative_multiple_of_seven(offset in -400i64..400) {
            let e = event(at(2024, 6, 15, 8), Some(RecurrenceKind::Weekly));
            let target = day(2024, 6, 15) + Duration::days(offset);
            prop_assert_eq!(occurs_on(&e, target, &Utc), offset >= 0 && offset % 7 == 0);
        }

        #[test]
        fn daily_occurs_iff_not_before_start(offset in -400i64..400) {
            let e = event(at(2024, 6, 15, 8), Some(RecurrenceKind::Daily));
            let target = day(2024, 6, 15) + Duration::days(offset);
            prop_assert_eq!(occurs_on(&e, target, &Utc), offset >= 0);
        }
    }
}
