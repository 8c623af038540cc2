//! Daily goals and their per-day completion records.
//!
//! A [`DailyGoalProgress`] record is keyed by `(goal_id, date)`. The toggle
//! upsert in [`toggle_progress`] is the only write path and keeps that pair
//! unique; storage itself does not.

pub mod stats;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::generate_id;
use crate::error::ValidationError;

pub use stats::{
    completion_trend, goal_stats, is_completed_on, overall_summary, rate_on, DailyRate, GoalStats,
    OverallSummary, TREND_DAYS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One (goal, day) completion fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoalProgress {
    pub date: NaiveDate,
    pub goal_id: String,
    pub completed: bool,
}

pub fn add_goal(
    goals: &mut Vec<Goal>,
    title: &str,
    category: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Goal, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let goal = Goal {
        id: generate_id(),
        title: title.to_string(),
        category,
        created_at: now,
    };
    goals.push(goal.clone());
    Ok(goal)
}

/// Delete a goal and every progress record that belongs to it.
///
/// Returns the number of progress records removed, or `None` when no goal
/// with `id` exists (in which case nothing is touched).
pub fn delete_goal(
    goals: &mut Vec<Goal>,
    progress: &mut Vec<DailyGoalProgress>,
    id: &str,
) -> Option<usize> {
    let before = goals.len();
    goals.retain(|g| g.id != id);
    if goals.len() == before {
        return None;
    }
    let before = progress.len();
    progress.retain(|p| p.goal_id != id);
    Some(before - progress.len())
}

/// Flip the `(goal_id, date)` record, inserting a completed one if absent.
///
/// Returns the record's completed value after the toggle.
pub fn toggle_progress(progress: &mut Vec<DailyGoalProgress>, goal_id: &str, date: NaiveDate) -> bool {
    if let Some(record) = progress
        .iter_mut()
        .find(|p| p.goal_id == goal_id && p.date == date)
    {
        record.completed = !record.completed;
        return record.completed;
    }

    progress.push(DailyGoalProgress {
        date,
        goal_id: goal_id.to_string(),
        completed: true,
    });
    true
}
