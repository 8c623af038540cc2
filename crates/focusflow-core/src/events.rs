use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{TimerMode, TimerState};

/// Every timer state change produces a TimerEvent.
/// Front ends print or poll these; nothing subscribes inside the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    TimerStarted {
        mode: TimerMode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A session ran out; the engine is idle with `next_mode` loaded.
    SessionCompleted {
        mode: TimerMode,
        next_mode: TimerMode,
        next_duration_min: u32,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: TimerMode,
        remaining_ms: u64,
        total_ms: u64,
        cycles_completed: u32,
        at: DateTime<Utc>,
    },
}
