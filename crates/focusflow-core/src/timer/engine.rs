//! Pomodoro timer engine.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!           |
//!           v (remaining hits zero)
//!         Idle, next mode loaded
//! ```
//!
//! Completing a work session bumps `cycles_completed`; every
//! `cycles_before_long_break`-th work session is followed by a long break.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{PomodoroSettings, TimerMode};
use crate::events::TimerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Operates on wall-clock deltas -- no internal thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroEngine {
    settings: PomodoroSettings,
    mode: TimerMode,
    state: TimerState,
    /// Remaining time in milliseconds for the current session.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) of the last flush while running.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl PomodoroEngine {
    /// Starts idle in work mode with the full work duration.
    pub fn new(settings: PomodoroSettings) -> Self {
        let remaining_ms = settings.duration_ms(TimerMode::Work);
        Self {
            settings,
            mode: TimerMode::Work,
            state: TimerState::Idle,
            remaining_ms,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn total_ms(&self) -> u64 {
        self.settings.duration_ms(self.mode)
    }

    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_ms as f64 / total as f64)
    }

    /// Remaining time as `MM:SS`.
    pub fn remaining_display(&self) -> String {
        let secs = self.remaining_ms.div_ceil(1000);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    pub fn snapshot(&self) -> TimerEvent {
        TimerEvent::StateSnapshot {
            state: self.state,
            mode: self.mode,
            remaining_ms: self.remaining_ms,
            total_ms: self.total_ms(),
            cycles_completed: self.settings.cycles_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<TimerEvent> {
        self.start_at(now_ms())
    }

    pub fn start_at(&mut self, now: u64) -> Option<TimerEvent> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                let resumed = self.state == TimerState::Paused;
                self.state = TimerState::Running;
                self.last_tick_epoch_ms = Some(now);
                Some(if resumed {
                    TimerEvent::TimerResumed {
                        remaining_ms: self.remaining_ms,
                        at: Utc::now(),
                    }
                } else {
                    TimerEvent::TimerStarted {
                        mode: self.mode,
                        duration_secs: self.total_ms() / 1000,
                        at: Utc::now(),
                    }
                })
            }
            TimerState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<TimerEvent> {
        self.pause_at(now_ms())
    }

    pub fn pause_at(&mut self, now: u64) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick_epoch_ms = None;
        Some(TimerEvent::TimerPaused {
            remaining_ms: self.remaining_ms,
            at: Utc::now(),
        })
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) -> Option<TimerEvent> {
        self.toggle_at(now_ms())
    }

    pub fn toggle_at(&mut self, now: u64) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => self.pause_at(now),
            TimerState::Idle | TimerState::Paused => self.start_at(now),
        }
    }

    /// Back to an idle work session. The cycle count is kept.
    pub fn reset(&mut self) -> Option<TimerEvent> {
        self.state = TimerState::Idle;
        self.mode = TimerMode::Work;
        self.last_tick_epoch_ms = None;
        self.remaining_ms = self.settings.duration_ms(TimerMode::Work);
        Some(TimerEvent::TimerReset { at: Utc::now() })
    }

    /// Call periodically. Returns `Some(TimerEvent::SessionCompleted)` when a
    /// session finishes.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now: u64) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        if self.remaining_ms > 0 {
            return None;
        }

        let finished = self.mode;
        if finished == TimerMode::Work {
            self.settings.cycles_completed += 1;
        }
        let next = self.settings.next_mode(finished);
        self.mode = next;
        self.remaining_ms = self.settings.duration_ms(next);
        self.state = TimerState::Idle;
        self.last_tick_epoch_ms = None;

        tracing::debug!(?finished, ?next, cycles = self.settings.cycles_completed, "session completed");
        Some(TimerEvent::SessionCompleted {
            mode: finished,
            next_mode: next,
            next_duration_min: self.settings.duration_min(next),
            cycles_completed: self.settings.cycles_completed,
            at: Utc::now(),
        })
    }

    /// Shift a mode's duration by `delta` minutes (clamped).
    ///
    /// If that mode is loaded and the timer is not running, the remaining
    /// time restarts from the new duration.
    pub fn adjust_duration(&mut self, mode: TimerMode, delta: i32) -> u32 {
        let minutes = self.settings.adjust(mode, delta);
        if self.mode == mode && self.state != TimerState::Running {
            self.remaining_ms = self.settings.duration_ms(mode);
        }
        minutes
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, now: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = now.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(now);
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: u64 = 60_000;

    fn engine() -> PomodoroEngine {
        PomodoroEngine::new(PomodoroSettings::default())
    }

    /// Run the loaded session to completion starting at `t`.
    fn finish(engine: &mut PomodoroEngine, t: u64) -> TimerEvent {
        engine.start_at(t);
        engine
            .tick_at(t + engine.total_ms())
            .expect("session should complete")
    }

    #[test]
    fn start_pause_resume() {
        let mut e = engine();
        assert_eq!(e.state(), TimerState::Idle);
        assert!(matches!(e.start_at(0), Some(TimerEvent::TimerStarted { .. })));
        assert!(e.start_at(1).is_none());
        assert!(matches!(e.toggle_at(5 * MIN), Some(TimerEvent::TimerPaused { .. })));
        assert_eq!(e.remaining_ms(), 20 * MIN);
        assert!(matches!(e.toggle_at(60 * MIN), Some(TimerEvent::TimerResumed { .. })));
        // Paused time does not count.
        e.tick_at(61 * MIN);
        assert_eq!(e.remaining_ms(), 19 * MIN);
    }

    #[test]
    fn work_completion_moves_to_break() {
        let mut e = engine();
        match finish(&mut e, 0) {
            TimerEvent::SessionCompleted {
                mode,
                next_mode,
                cycles_completed,
                ..
            } => {
                assert_eq!(mode, TimerMode::Work);
                assert_eq!(next_mode, TimerMode::Break);
                assert_eq!(cycles_completed, 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_ms(), 5 * MIN);
    }

    #[test]
    fn fourth_cycle_earns_long_break() {
        let mut e = engine();
        let mut t = 0;
        for _ in 0..3 {
            finish(&mut e, t); // work
            t += 100 * MIN;
            finish(&mut e, t); // break
            t += 100 * MIN;
        }
        finish(&mut e, t);
        assert_eq!(e.mode(), TimerMode::LongBreak);
        assert_eq!(e.settings().cycles_completed, 4);
        assert_eq!(e.remaining_ms(), 15 * MIN);
        finish(&mut e, t + 100 * MIN);
        assert_eq!(e.mode(), TimerMode::Work);
    }

    #[test]
    fn reset_returns_to_work_and_keeps_cycles() {
        let mut e = engine();
        finish(&mut e, 0);
        e.reset();
        assert_eq!(e.mode(), TimerMode::Work);
        assert_eq!(e.state(), TimerState::Idle);
        assert_eq!(e.remaining_ms(), 25 * MIN);
        assert_eq!(e.settings().cycles_completed, 1);
    }

    #[test]
    fn adjusting_idle_mode_resets_remaining() {
        let mut e = engine();
        assert_eq!(e.adjust_duration(TimerMode::Work, 5), 30);
        assert_eq!(e.remaining_ms(), 30 * MIN);
        e.start_at(0);
        e.adjust_duration(TimerMode::Work, 5);
        assert_eq!(e.remaining_ms(), 30 * MIN);
        e.adjust_duration(TimerMode::Break, 1);
        assert_eq!(e.settings().break_duration, 6);
    }

    #[test]
    fn remaining_display_rounds_up() {
        let mut e = engine();
        assert_eq!(e.remaining_display(), "25:00");
        e.start_at(0);
        e.tick_at(1_500);
        assert_eq!(e.remaining_display(), "24:59");
    }

    #[test]
    fn engine_state_survives_serialization() {
        let mut e = engine();
        e.start_at(0);
        e.pause_at(MIN);
        let json = serde_json::to_string(&e).unwrap();
        let restored: PomodoroEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), TimerState::Paused);
        assert_eq!(restored.remaining_ms(), 24 * MIN);
    }
}
