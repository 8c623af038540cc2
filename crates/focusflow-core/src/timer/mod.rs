mod engine;
mod mode;

pub use engine::{PomodoroEngine, TimerState};
pub use mode::{PomodoroSettings, TimerMode};
