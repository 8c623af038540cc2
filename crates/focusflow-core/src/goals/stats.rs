//! Streak and completion statistics over the flat progress catalog.
//!
//! Streaks are runs of consecutive *records*, not consecutive days: a day with
//! no record at all does not break a streak, only an explicit
//! `completed = false` record does.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{DailyGoalProgress, Goal};
use crate::dates::days_ending_on;

/// Length of the completion trend shown next to the goal list.
pub const TREND_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStats {
    pub goal_id: String,
    pub total_days: u32,
    pub completed_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// 0..=100
    pub completion_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRate {
    pub date: NaiveDate,
    pub rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub date: Option<NaiveDate>,
    pub active_goals: u32,
    pub completed_on_date: u32,
    pub completion_rate: u32,
    pub total_completed: u32,
    pub best_streak: u32,
}

/// Rounded percentage, half away from zero. 0 when `whole` is 0.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (u64::from(part), u64::from(whole));
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Statistics for one goal. Unknown ids yield zeroed stats.
pub fn goal_stats(goal_id: &str, progress: &[DailyGoalProgress]) -> GoalStats {
    let mut records: Vec<&DailyGoalProgress> =
        progress.iter().filter(|p| p.goal_id == goal_id).collect();

    let total_days = records.len() as u32;
    let completed_days = records.iter().filter(|p| p.completed).count() as u32;

    // Most recent first.
    records.sort_by(|a, b| b.date.cmp(&a.date));
    let current_streak = records.iter().take_while(|p| p.completed).count() as u32;

    let mut longest_streak = 0;
    let mut run = 0;
    for record in records.iter().rev() {
        if record.completed {
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    GoalStats {
        goal_id: goal_id.to_string(),
        total_days,
        completed_days,
        current_streak,
        longest_streak,
        completion_rate: percent(completed_days, total_days),
    }
}

pub fn is_completed_on(goal_id: &str, date: NaiveDate, progress: &[DailyGoalProgress]) -> bool {
    progress
        .iter()
        .any(|p| p.goal_id == goal_id && p.date == date && p.completed)
}

/// Completed records belonging to a goal in `goals`, optionally limited to
/// one day. Progress left behind by deleted goals never counts.
fn completed_records(goals: &[Goal], progress: &[DailyGoalProgress], date: Option<NaiveDate>) -> u32 {
    let known: HashSet<&str> = goals.iter().map(|g| g.id.as_str()).collect();
    progress
        .iter()
        .filter(|p| p.completed && known.contains(p.goal_id.as_str()))
        .filter(|p| date.map_or(true, |d| p.date == d))
        .count() as u32
}

/// Share of goals completed on `date`, 0..=100. 0 when there are no goals.
pub fn rate_on(goals: &[Goal], progress: &[DailyGoalProgress], date: NaiveDate) -> u32 {
    percent(completed_records(goals, progress, Some(date)), goals.len() as u32)
}

/// Daily completion rate for the `days` days ending on `reference`, oldest first.
pub fn completion_trend(
    goals: &[Goal],
    progress: &[DailyGoalProgress],
    reference: NaiveDate,
    days: u32,
) -> Vec<DailyRate> {
    days_ending_on(reference, days)
        .into_iter()
        .map(|date| DailyRate {
            date,
            rate: rate_on(goals, progress, date),
        })
        .collect()
}

pub fn overall_summary(
    goals: &[Goal],
    progress: &[DailyGoalProgress],
    date: NaiveDate,
) -> OverallSummary {
    OverallSummary {
        date: Some(date),
        active_goals: goals.len() as u32,
        completed_on_date: completed_records(goals, progress, Some(date)),
        completion_rate: rate_on(goals, progress, date),
        total_completed: completed_records(goals, progress, None),
        best_streak: goals
            .iter()
            .map(|g| goal_stats(&g.id, progress).longest_streak)
            .max()
            .unwrap_or(0),
    }
}
