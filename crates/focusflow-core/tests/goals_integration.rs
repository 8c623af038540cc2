//! Integration tests for goal tracking through a SQLite-backed workspace.
//!
//! These tests drive the same load-mutate-save path the CLI uses and check
//! that streaks and rates survive reopening the database.

use chrono::{NaiveDate, Utc};
use focusflow_core::storage::{keys, KvStore};
use focusflow_core::{Config, SqliteStore, Workspace};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn open(path: &std::path::Path) -> Workspace<SqliteStore, Utc> {
    let store = SqliteStore::open_at(path).unwrap();
    Workspace::with_timezone(store, Config::default(), Utc)
}

#[test]
fn test_streaks_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusflow.db");

    let goal_id = {
        let ws = open(&path);
        let goal = ws.add_goal("Meditate", Some("health")).unwrap();
        for d in [1, 2, 3, 5, 6] {
            ws.toggle_goal(&goal.id, day(d)).unwrap();
        }
        // Explicit miss on the 4th.
        ws.toggle_goal(&goal.id, day(4)).unwrap();
        ws.toggle_goal(&goal.id, day(4)).unwrap();
        goal.id
    };

    let ws = open(&path);
    let stats = ws.goal_stats(&goal_id);
    assert_eq!(stats.total_days, 6);
    assert_eq!(stats.completed_days, 5);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.completion_rate, 83);
}

#[test]
fn test_rates_ignore_orphaned_progress() {
    let dir = tempfile::tempdir().unwrap();
    let ws = open(&dir.path().join("focusflow.db"));

    let a = ws.add_goal("Read", None).unwrap();
    let _b = ws.add_goal("Write", None).unwrap();
    let _c = ws.add_goal("Run", None).unwrap();
    ws.toggle_goal(&a.id, day(10)).unwrap();

    // A record for a goal that no longer exists, as an older build could leave.
    ws.store()
        .set(
            keys::DAILY_PROGRESS,
            &format!(
                r#"[{{"date":"2024-05-10","goalId":"{}","completed":true}},
                    {{"date":"2024-05-10","goalId":"ghost","completed":true}}]"#,
                a.id
            ),
        )
        .unwrap();

    let summary = ws.summary(day(10));
    assert_eq!(summary.active_goals, 3);
    assert_eq!(summary.completed_on_date, 1);
    assert_eq!(summary.completion_rate, 33);

    let trend = ws.trend(day(10), 7);
    assert_eq!(trend.len(), 7);
    assert_eq!(trend.last().unwrap().rate, 33);
}

#[test]
fn test_no_goals_means_zero_rate() {
    let dir = tempfile::tempdir().unwrap();
    let ws = open(&dir.path().join("focusflow.db"));
    let summary = ws.summary(day(1));
    assert_eq!(summary.active_goals, 0);
    assert_eq!(summary.completion_rate, 0);
    assert_eq!(summary.best_streak, 0);
    assert!(ws.trend(day(1), 7).iter().all(|r| r.rate == 0));
}

#[test]
fn test_corrupt_collection_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let ws = open(&dir.path().join("focusflow.db"));
    ws.store().set(keys::GOALS, "not json at all").unwrap();
    assert!(ws.goals().is_empty());

    // The next write replaces the corrupt value.
    ws.add_goal("Fresh start", None).unwrap();
    assert_eq!(ws.goals().len(), 1);
}
