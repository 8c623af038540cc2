//! Local reminder notifications.
//!
//! The OS notification service is an external collaborator behind
//! [`NotificationScheduler`]. This module only decides *what* to schedule;
//! scheduling failures are logged and never surface to the caller.

use chrono::{DateTime, NaiveTime, Timelike, TimeZone, Utc, Weekday};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::{review_reminders, MemoryItem, REVIEW_ID_PREFIX};
use crate::storage::config::RemindersConfig;

pub const DAILY_GOALS_ID: &str = "daily-goals-reminder";
pub const WEEKLY_PLANNING_ID: &str = "weekly-planning-reminder";
pub const WEEKLY_PRIORITIES_ID: &str = "weekly-priorities-reminder";

const APP_TITLE: &str = "FocusFlow";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    Once { at: DateTime<Utc> },
    Daily { hour: u32, minute: u32 },
    Weekly { weekday: Weekday, hour: u32, minute: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Stable identifier; scheduling the same id again replaces it.
    pub id: String,
    pub title: String,
    pub body: String,
    pub trigger: Trigger,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Notification service error: {0}")]
    Service(String),
}

/// OS notification service.
pub trait NotificationScheduler {
    fn schedule(&mut self, reminder: &Reminder) -> Result<(), NotificationError>;
    fn cancel(&mut self, id: &str) -> Result<(), NotificationError>;
    fn cancel_all(&mut self) -> Result<(), NotificationError>;
    /// Ids of everything currently scheduled.
    fn pending(&self) -> Result<Vec<String>, NotificationError>;
}

/// In-process scheduler that keeps reminders in insertion order.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    reminders: IndexMap<String, Reminder>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Reminder> {
        self.reminders.get(id)
    }

    pub fn reminders(&self) -> impl Iterator<Item = &Reminder> {
        self.reminders.values()
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

impl NotificationScheduler for RecordingScheduler {
    fn schedule(&mut self, reminder: &Reminder) -> Result<(), NotificationError> {
        self.reminders.insert(reminder.id.clone(), reminder.clone());
        Ok(())
    }

    fn cancel(&mut self, id: &str) -> Result<(), NotificationError> {
        self.reminders.shift_remove(id);
        Ok(())
    }

    fn cancel_all(&mut self) -> Result<(), NotificationError> {
        self.reminders.clear();
        Ok(())
    }

    fn pending(&self) -> Result<Vec<String>, NotificationError> {
        Ok(self.reminders.keys().cloned().collect())
    }
}

fn hm(t: NaiveTime) -> (u32, u32) {
    (t.hour(), t.minute())
}

/// The recurring daily/weekly reminders described by `config`.
pub fn default_reminders(config: &RemindersConfig) -> Vec<Reminder> {
    let (gh, gm) = hm(config.daily_goals_at);
    let (ph, pm) = hm(config.weekly_planning_at);
    let (rh, rm) = hm(config.weekly_priorities_at);
    vec![
        Reminder {
            id: DAILY_GOALS_ID.into(),
            title: APP_TITLE.into(),
            body: "Remember to check off today's goals.".into(),
            trigger: Trigger::Daily { hour: gh, minute: gm },
        },
        Reminder {
            id: WEEKLY_PLANNING_ID.into(),
            title: APP_TITLE.into(),
            body: "Plan your week in the schedule.".into(),
            trigger: Trigger::Weekly {
                weekday: config.weekly_planning_day,
                hour: ph,
                minute: pm,
            },
        },
        Reminder {
            id: WEEKLY_PRIORITIES_ID.into(),
            title: APP_TITLE.into(),
            body: "Update your priority matrix to start the week well.".into(),
            trigger: Trigger::Weekly {
                weekday: config.weekly_priorities_day,
                hour: rh,
                minute: rm,
            },
        },
    ]
}

/// Cancel-then-schedule each reminder. Returns how many were scheduled.
pub fn install<S: NotificationScheduler + ?Sized>(scheduler: &mut S, reminders: &[Reminder]) -> usize {
    let mut installed = 0;
    for reminder in reminders {
        if let Err(e) = scheduler.cancel(&reminder.id) {
            tracing::warn!(id = %reminder.id, error = %e, "failed to cancel reminder");
        }
        match scheduler.schedule(reminder) {
            Ok(()) => installed += 1,
            Err(e) => tracing::error!(id = %reminder.id, error = %e, "failed to schedule reminder"),
        }
    }
    tracing::debug!(installed, "reminders installed");
    installed
}

/// Install the recurring reminders, or do nothing when reminders are disabled.
pub fn install_defaults<S: NotificationScheduler + ?Sized>(
    scheduler: &mut S,
    config: &RemindersConfig,
) -> usize {
    if !config.enabled {
        tracing::debug!("reminders disabled, nothing installed");
        return 0;
    }
    install(scheduler, &default_reminders(config))
}

/// Replace every memory review reminder with the plan for `items`.
pub fn sync_memory_reviews<S, Tz>(
    scheduler: &mut S,
    items: &[MemoryItem],
    config: &RemindersConfig,
    now: DateTime<Utc>,
    tz: &Tz,
) -> usize
where
    S: NotificationScheduler + ?Sized,
    Tz: TimeZone,
{
    match scheduler.pending() {
        Ok(ids) => {
            for id in ids.iter().filter(|id| id.starts_with(REVIEW_ID_PREFIX)) {
                if let Err(e) = scheduler.cancel(id) {
                    tracing::warn!(id = %id, error = %e, "failed to cancel review reminder");
                }
            }
        }
        Err(e) => tracing::warn!(error = %e, "could not list scheduled reminders"),
    }

    if !config.enabled {
        return 0;
    }
    let plan: Vec<Reminder> = items
        .iter()
        .flat_map(|item| review_reminders(item, config.memory_review_at, now, tz))
        .collect();
    install(scheduler, &plan)
}

/// Clear everything scheduled, then install the full plan: the recurring
/// reminders plus memory reviews. With reminders disabled this only clears.
pub fn reschedule_all<S, Tz>(
    scheduler: &mut S,
    items: &[MemoryItem],
    config: &RemindersConfig,
    now: DateTime<Utc>,
    tz: &Tz,
) -> usize
where
    S: NotificationScheduler + ?Sized,
    Tz: TimeZone,
{
    if let Err(e) = scheduler.cancel_all() {
        tracing::warn!(error = %e, "failed to clear scheduled reminders");
    }
    install_defaults(scheduler, config) + sync_memory_reviews(scheduler, items, config, now, tz)
}
