//! Integration tests for recurring calendar events.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use focusflow_core::storage::{keys, KvStore};
use focusflow_core::{Config, MemoryStore, NewEvent, RecurrenceKind, Workspace};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_event(title: &str, y: i32, m: u32, d: u32, recurrence: Option<RecurrenceKind>) -> NewEvent {
    let start = Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap();
    NewEvent {
        title: title.into(),
        color: "#4ECDC4".into(),
        start_time: start,
        end_time: start + Duration::hours(1),
        recurrence,
    }
}

#[test]
fn test_monthly_event_skips_short_months() {
    let ws = Workspace::with_timezone(MemoryStore::new(), Config::default(), Utc);
    ws.add_event(new_event("Rent", 2024, 1, 31, Some(RecurrenceKind::Monthly)))
        .unwrap();

    assert_eq!(ws.events_on(ymd(2024, 1, 31)).len(), 1);
    assert!(ws.events_on(ymd(2024, 2, 29)).is_empty());
    assert!(ws.events_on(ymd(2024, 4, 30)).is_empty());
    assert_eq!(ws.events_on(ymd(2024, 3, 31)).len(), 1);
}

#[test]
fn test_mixed_recurrences_in_one_week() {
    let ws = Workspace::with_timezone(MemoryStore::new(), Config::default(), Utc);
    ws.add_event(new_event("Gym", 2024, 1, 1, Some(RecurrenceKind::Daily)))
        .unwrap();
    ws.add_event(new_event("Review", 2024, 1, 5, Some(RecurrenceKind::Weekly)))
        .unwrap();
    ws.add_event(new_event("Dentist", 2024, 1, 10, None)).unwrap();

    // Week of Monday 2024-01-08.
    let week = ws.week(ymd(2024, 1, 10));
    let counts: Vec<usize> = week.iter().map(|(_, events)| events.len()).collect();
    assert_eq!(week[0].0, ymd(2024, 1, 8));
    assert_eq!(counts, vec![1, 1, 2, 1, 2, 1, 1]);
}

#[test]
fn test_legacy_records_without_recurrence_type() {
    let ws = Workspace::with_timezone(MemoryStore::new(), Config::default(), Utc);
    ws.store()
        .set(
            keys::EVENTS,
            r##"[{
                "id": "legacy",
                "title": "Flagged but untyped",
                "color": "#FF6B6B",
                "startTime": "2024-01-01T10:00:00Z",
                "endTime": "2024-01-01T11:00:00Z",
                "isRecurring": true,
                "createdAt": "2024-01-01T09:00:00Z"
            }]"##,
        )
        .unwrap();

    assert_eq!(ws.events_on(ymd(2024, 1, 1)).len(), 1);
    assert!(ws.events_on(ymd(2024, 1, 2)).is_empty());
}

#[test]
fn test_deleted_event_disappears_from_every_day() {
    let ws = Workspace::with_timezone(MemoryStore::new(), Config::default(), Utc);
    let event = ws
        .add_event(new_event("Standup", 2024, 1, 1, Some(RecurrenceKind::Daily)))
        .unwrap();
    ws.delete_event(&event.id).unwrap();
    assert!(ws.week(ymd(2024, 1, 3)).iter().all(|(_, e)| e.is_empty()));
}
