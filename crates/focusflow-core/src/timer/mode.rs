use serde::{Deserialize, Serialize};

use crate::storage::config::PomodoroConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    Work,
    Break,
    LongBreak,
}

impl TimerMode {
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::Break => "Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Allowed duration range in minutes.
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            TimerMode::Work => (1, 60),
            TimerMode::Break => (1, 30),
            TimerMode::LongBreak => (5, 60),
        }
    }
}

impl std::str::FromStr for TimerMode {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "focus" => Ok(TimerMode::Work),
            "break" => Ok(TimerMode::Break),
            "longbreak" | "long-break" | "long_break" => Ok(TimerMode::LongBreak),
            other => Err(crate::error::ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected work, break or long-break; got '{other}'"),
            }),
        }
    }
}

/// Persisted Pomodoro settings and progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSettings {
    /// Minutes.
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    #[serde(default)]
    pub cycles_completed: u32,
    #[serde(default = "default_cycles_before_long_break")]
    pub cycles_before_long_break: u32,
}

fn default_cycles_before_long_break() -> u32 {
    4
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self::from(&PomodoroConfig::default())
    }
}

impl From<&PomodoroConfig> for PomodoroSettings {
    fn from(config: &PomodoroConfig) -> Self {
        let mut settings = Self {
            work_duration: config.work_minutes,
            break_duration: config.break_minutes,
            long_break_duration: config.long_break_minutes,
            cycles_completed: 0,
            cycles_before_long_break: config.cycles_before_long_break.max(1),
        };
        for mode in [TimerMode::Work, TimerMode::Break, TimerMode::LongBreak] {
            let current = settings.duration_min(mode);
            settings.set_duration(mode, current);
        }
        settings
    }
}

impl PomodoroSettings {
    pub fn duration_min(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_duration,
            TimerMode::Break => self.break_duration,
            TimerMode::LongBreak => self.long_break_duration,
        }
    }

    /// Get mode duration in milliseconds.
    pub fn duration_ms(&self, mode: TimerMode) -> u64 {
        u64::from(self.duration_min(mode))
            .saturating_mul(60)
            .saturating_mul(1000)
    }

    /// Set a duration, clamped to the mode's bounds. Returns the stored value.
    pub fn set_duration(&mut self, mode: TimerMode, minutes: u32) -> u32 {
        let (lo, hi) = mode.bounds();
        let minutes = minutes.clamp(lo, hi);
        match mode {
            TimerMode::Work => self.work_duration = minutes,
            TimerMode::Break => self.break_duration = minutes,
            TimerMode::LongBreak => self.long_break_duration = minutes,
        }
        minutes
    }

    /// Shift a duration by `delta` minutes within the mode's bounds.
    pub fn adjust(&mut self, mode: TimerMode, delta: i32) -> u32 {
        let target = i64::from(self.duration_min(mode)) + i64::from(delta);
        let target = target.clamp(0, i64::from(u32::MAX)) as u32;
        self.set_duration(mode, target)
    }

    /// Mode that follows a completed `mode`, given the updated cycle count.
    pub fn next_mode(&self, mode: TimerMode) -> TimerMode {
        match mode {
            TimerMode::Work if self.cycles_completed % self.cycles_before_long_break.max(1) == 0 => {
                TimerMode::LongBreak
            }
            TimerMode::Work => TimerMode::Break,
            TimerMode::Break | TimerMode::LongBreak => TimerMode::Work,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_25_5_15() {
        let s = PomodoroSettings::default();
        assert_eq!(
            (s.work_duration, s.break_duration, s.long_break_duration),
            (25, 5, 15)
        );
        assert_eq!(s.duration_ms(TimerMode::Work), 25 * 60 * 1000);
    }

    #[test]
    fn adjust_clamps_per_mode() {
        let mut s = PomodoroSettings::default();
        assert_eq!(s.adjust(TimerMode::Work, 100), 60);
        assert_eq!(s.adjust(TimerMode::Work, -100), 1);
        assert_eq!(s.adjust(TimerMode::Break, 40), 30);
        assert_eq!(s.adjust(TimerMode::LongBreak, -14), 5);
    }

    #[test]
    fn config_values_are_clamped() {
        let config = PomodoroConfig {
            work_minutes: 90,
            break_minutes: 0,
            long_break_minutes: 2,
            cycles_before_long_break: 0,
        };
        let s = PomodoroSettings::from(&config);
        assert_eq!(s.work_duration, 60);
        assert_eq!(s.break_duration, 1);
        assert_eq!(s.long_break_duration, 5);
        assert_eq!(s.cycles_before_long_break, 1);
    }

    #[test]
    fn mode_names_parse() {
        assert_eq!("long-break".parse::<TimerMode>().unwrap(), TimerMode::LongBreak);
        assert_eq!("Focus".parse::<TimerMode>().unwrap(), TimerMode::Work);
        assert!("nap".parse::<TimerMode>().is_err());
    }

    #[test]
    fn stored_shape_uses_camel_case() {
        let json: PomodoroSettings = serde_json::from_str(
            r#"{"workDuration":50,"breakDuration":10,"longBreakDuration":20,"cyclesCompleted":3}"#,
        )
        .unwrap();
        assert_eq!(json.cycles_completed, 3);
        assert_eq!(json.cycles_before_long_break, 4);
    }
}
