//! Eisenhower priority board.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dates::generate_id;
use crate::error::ValidationError;

/// One of the four urgent/important buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    UrgentImportant,
    ImportantNotUrgent,
    UrgentNotImportant,
    Neither,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::ImportantNotUrgent,
        Quadrant::UrgentNotImportant,
        Quadrant::Neither,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::ImportantNotUrgent => "important-not-urgent",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::Neither => "neither",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::ImportantNotUrgent => "Important, Not Urgent",
            Quadrant::UrgentNotImportant => "Urgent, Not Important",
            Quadrant::Neither => "Neither Urgent nor Important",
        }
    }

    /// What to do with tasks in this bucket.
    pub fn advice(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Do it now",
            Quadrant::ImportantNotUrgent => "Schedule it",
            Quadrant::UrgentNotImportant => "Delegate it",
            Quadrant::Neither => "Drop it",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Quadrant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quadrant::ALL
            .into_iter()
            .find(|q| q.key() == s.trim())
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "quadrant".into(),
                message: format!(
                    "expected one of urgent-important, important-not-urgent, \
                     urgent-not-important, neither; got '{s}'"
                ),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub quadrant: Quadrant,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

pub fn add_task(
    tasks: &mut Vec<Task>,
    title: &str,
    quadrant: Quadrant,
    now: DateTime<Utc>,
) -> Result<Task, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    let task = Task {
        id: generate_id(),
        title: title.to_string(),
        quadrant,
        completed: false,
        created_at: now,
    };
    tasks.push(task.clone());
    Ok(task)
}

/// Mark a task done. Completed tasks drop off the active board.
pub fn complete_task(tasks: &mut [Task], id: &str) -> bool {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.completed = true;
            true
        }
        None => false,
    }
}

pub fn move_task(tasks: &mut [Task], id: &str, quadrant: Quadrant) -> bool {
    match tasks.iter_mut().find(|t| t.id == id) {
        Some(task) => {
            task.quadrant = quadrant;
            true
        }
        None => false,
    }
}

pub fn delete_task(tasks: &mut Vec<Task>, id: &str) -> bool {
    let before = tasks.len();
    tasks.retain(|t| t.id != id);
    tasks.len() != before
}

/// Active tasks in `quadrant`, in catalog order.
pub fn tasks_in(tasks: &[Task], quadrant: Quadrant) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.completed && t.quadrant == quadrant)
        .collect()
}

pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}
