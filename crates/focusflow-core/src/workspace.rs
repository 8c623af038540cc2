//! Load-mutate-save facade over a [`KvStore`].
//!
//! Every operation reloads the collection it touches, applies a pure
//! function from the domain modules, and writes the whole collection back.
//! Validation happens before any write. A failed save is logged and
//! otherwise ignored; the returned value still reflects the mutation.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calendar::{self, Event, NewEvent};
use crate::dates::week_of;
use crate::error::{CoreError, Result};
use crate::goals::{self, DailyGoalProgress, DailyRate, Goal, GoalStats, OverallSummary};
use crate::memory::{self, MemoryItem};
use crate::priorities::{self, Quadrant, Task};
use crate::storage::config::Config;
use crate::storage::{keys, load_collection, save_collection, KvStore};
use crate::theme::Theme;
use crate::timer::{PomodoroEngine, PomodoroSettings};

pub struct Workspace<S, Tz: TimeZone = Local> {
    store: S,
    config: Config,
    tz: Tz,
}

impl<S: KvStore> Workspace<S, Local> {
    pub fn new(store: S, config: Config) -> Self {
        Self::with_timezone(store, config, Local)
    }
}

impl<S: KvStore, Tz: TimeZone> Workspace<S, Tz> {
    /// Resolve calendar days in `tz` instead of the local zone.
    pub fn with_timezone(store: S, config: Config, tz: Tz) -> Self {
        Self { store, config, tz }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    /// Today's calendar day in the workspace time zone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    fn persist<T: Serialize + DeserializeOwned>(&self, key: &str, items: &[T]) {
        if let Err(e) = save_collection(&self.store, key, items) {
            tracing::error!(key, error = %e, "save failed, change kept in memory only");
        }
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        load_collection(&self.store, key)
    }

    // ── Calendar ─────────────────────────────────────────────────────

    pub fn events(&self) -> Vec<Event> {
        self.load(keys::EVENTS)
    }

    pub fn add_event(&self, input: NewEvent) -> Result<Event> {
        let mut events = self.events();
        let event = calendar::add_event(&mut events, input, Utc::now())?;
        self.persist(keys::EVENTS, &events);
        tracing::info!(id = %event.id, title = %event.title, "event added");
        Ok(event)
    }

    pub fn delete_event(&self, id: &str) -> Result<()> {
        let mut events = self.events();
        if !calendar::delete_event(&mut events, id) {
            return Err(CoreError::not_found("event", id));
        }
        self.persist(keys::EVENTS, &events);
        Ok(())
    }

    pub fn events_on(&self, date: NaiveDate) -> Vec<Event> {
        let events = self.events();
        calendar::events_on(&events, date, &self.tz)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Monday..Sunday of `date`'s week with the events visible on each day.
    pub fn week(&self, date: NaiveDate) -> Vec<(NaiveDate, Vec<Event>)> {
        let events = self.events();
        week_of(date)
            .into_iter()
            .map(|day| {
                let visible = calendar::events_on(&events, day, &self.tz)
                    .into_iter()
                    .cloned()
                    .collect();
                (day, visible)
            })
            .collect()
    }

    // ── Priority board ───────────────────────────────────────────────

    pub fn tasks(&self) -> Vec<Task> {
        self.load(keys::TASKS)
    }

    /// Tasks still on the board.
    pub fn active_tasks(&self) -> Vec<Task> {
        self.tasks().into_iter().filter(|t| !t.completed).collect()
    }

    pub fn add_task(&self, title: &str, quadrant: Quadrant) -> Result<Task> {
        let mut tasks = self.tasks();
        let task = priorities::add_task(&mut tasks, title, quadrant, Utc::now())?;
        self.persist(keys::TASKS, &tasks);
        Ok(task)
    }

    pub fn complete_task(&self, id: &str) -> Result<()> {
        self.update_tasks(id, |tasks| priorities::complete_task(tasks, id))
    }

    pub fn move_task(&self, id: &str, quadrant: Quadrant) -> Result<()> {
        self.update_tasks(id, |tasks| priorities::move_task(tasks, id, quadrant))
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        self.update_tasks(id, |tasks| priorities::delete_task(tasks, id))
    }

    fn update_tasks(&self, id: &str, op: impl FnOnce(&mut Vec<Task>) -> bool) -> Result<()> {
        let mut tasks = self.tasks();
        if !op(&mut tasks) {
            return Err(CoreError::not_found("task", id));
        }
        self.persist(keys::TASKS, &tasks);
        Ok(())
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn goals(&self) -> Vec<Goal> {
        self.load(keys::GOALS)
    }

    pub fn progress(&self) -> Vec<DailyGoalProgress> {
        self.load(keys::DAILY_PROGRESS)
    }

    pub fn add_goal(&self, title: &str, category: Option<&str>) -> Result<Goal> {
        let mut goals = self.goals();
        let goal = goals::add_goal(&mut goals, title, category, Utc::now())?;
        self.persist(keys::GOALS, &goals);
        tracing::info!(id = %goal.id, title = %goal.title, "goal added");
        Ok(goal)
    }

    /// Delete a goal and its whole history. Returns the number of progress
    /// records removed.
    pub fn delete_goal(&self, id: &str) -> Result<usize> {
        let mut goals = self.goals();
        let mut progress = self.progress();
        let removed = goals::delete_goal(&mut goals, &mut progress, id)
            .ok_or_else(|| CoreError::not_found("goal", id))?;
        self.persist(keys::GOALS, &goals);
        self.persist(keys::DAILY_PROGRESS, &progress);
        tracing::info!(id, removed, "goal deleted");
        Ok(removed)
    }

    /// Toggle `(goal, date)`. Returns the completed value after the toggle.
    pub fn toggle_goal(&self, goal_id: &str, date: NaiveDate) -> Result<bool> {
        if !self.goals().iter().any(|g| g.id == goal_id) {
            return Err(CoreError::not_found("goal", goal_id));
        }
        let mut progress = self.progress();
        let completed = goals::toggle_progress(&mut progress, goal_id, date);
        self.persist(keys::DAILY_PROGRESS, &progress);
        Ok(completed)
    }

    pub fn goal_stats(&self, goal_id: &str) -> GoalStats {
        goals::goal_stats(goal_id, &self.progress())
    }

    pub fn summary(&self, date: NaiveDate) -> OverallSummary {
        goals::overall_summary(&self.goals(), &self.progress(), date)
    }

    pub fn trend(&self, reference: NaiveDate, days: u32) -> Vec<DailyRate> {
        goals::completion_trend(&self.goals(), &self.progress(), reference, days)
    }

    // ── Memory ───────────────────────────────────────────────────────

    pub fn memory_items(&self) -> Vec<MemoryItem> {
        self.load(keys::MEMORY)
    }

    pub fn add_memory_item(&self, title: &str, content: &str) -> Result<MemoryItem> {
        let mut items = self.memory_items();
        let item = memory::add_memory_item(&mut items, title, content, Utc::now())?;
        self.persist(keys::MEMORY, &items);
        Ok(item)
    }

    pub fn delete_memory_item(&self, id: &str) -> Result<()> {
        let mut items = self.memory_items();
        if !memory::delete_memory_item(&mut items, id) {
            return Err(CoreError::not_found("memory item", id));
        }
        self.persist(keys::MEMORY, &items);
        Ok(())
    }

    // ── Pomodoro ─────────────────────────────────────────────────────

    /// Stored settings, or the configured defaults.
    pub fn pomodoro_settings(&self) -> PomodoroSettings {
        self.load_document(keys::POMODORO)
            .unwrap_or_else(|| PomodoroSettings::from(&self.config.pomodoro))
    }

    pub fn save_pomodoro_settings(&self, settings: &PomodoroSettings) {
        self.persist_document(keys::POMODORO, settings);
    }

    /// The saved engine, or a fresh one built from the stored settings.
    pub fn timer(&self) -> PomodoroEngine {
        self.load_document(keys::TIMER)
            .unwrap_or_else(|| PomodoroEngine::new(self.pomodoro_settings()))
    }

    pub fn save_timer(&self, engine: &PomodoroEngine) {
        self.persist_document(keys::TIMER, engine);
        self.save_pomodoro_settings(engine.settings());
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        match self.store.get(keys::THEME) {
            Ok(Some(raw)) => Theme::from_stored(&raw).unwrap_or(self.config.ui.theme),
            Ok(None) => self.config.ui.theme,
            Err(e) => {
                tracing::error!(error = %e, "failed to read theme");
                self.config.ui.theme
            }
        }
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggle();
        if let Err(e) = self.store.set(keys::THEME, next.as_str()) {
            tracing::error!(error = %e, "failed to save theme");
        }
        next
    }

    // ── Single documents ─────────────────────────────────────────────

    fn load_document<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read document");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| tracing::warn!(key, error = %e, "ignoring malformed document"))
            .ok()
    }

    fn persist_document<T: Serialize>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(CoreError::from)
            .and_then(|json| self.store.set(key, &json).map_err(CoreError::from));
        if let Err(e) = result {
            tracing::error!(key, error = %e, "save failed");
        }
    }
}
