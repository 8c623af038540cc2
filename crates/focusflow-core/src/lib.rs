//! # FocusFlow Core Library
//!
//! Business logic for the FocusFlow personal productivity planner. The CLI
//! is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Calendar**: events with daily, weekly or monthly recurrence and the
//!   resolver deciding which events appear on a given day
//! - **Goals**: daily goal check-ins, streaks and completion rates
//! - **Priorities**: the four-quadrant task board
//! - **Memory**: notes with spaced review reminders
//! - **Timer**: a wall-clock Pomodoro engine driven by `tick()`
//! - **Storage**: whole-collection JSON documents in a key-value store and
//!   TOML configuration
//!
//! ## Key Components
//!
//! - [`Workspace`]: load-mutate-save facade over a [`KvStore`]
//! - [`occurs_on`]: recurrence resolution
//! - [`goal_stats`]: streak and completion engine
//! - [`PomodoroEngine`]: timer state machine

pub mod calendar;
pub mod dates;
pub mod error;
pub mod events;
pub mod goals;
pub mod memory;
pub mod notifications;
pub mod priorities;
pub mod storage;
pub mod theme;
pub mod timer;
mod workspace;

pub use calendar::{occurs_on, Event, NewEvent, RecurrenceKind};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use events::TimerEvent;
pub use goals::{goal_stats, DailyGoalProgress, DailyRate, Goal, GoalStats, OverallSummary};
pub use memory::MemoryItem;
pub use notifications::{NotificationScheduler, RecordingScheduler, Reminder, Trigger};
pub use priorities::{Quadrant, Task};
pub use storage::{Config, KvStore, MemoryStore, SqliteStore};
pub use theme::Theme;
pub use timer::{PomodoroEngine, PomodoroSettings, TimerMode, TimerState};
pub use workspace::Workspace;
