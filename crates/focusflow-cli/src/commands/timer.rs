use clap::Subcommand;
use focusflow_core::{PomodoroEngine, SqliteStore, TimerEvent, TimerMode, Workspace};

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the loaded session
    Start,
    /// Pause a running session
    Pause,
    /// Start when stopped, pause when running
    Toggle,
    /// Back to an idle work session
    Reset,
    /// Advance the clock and report a finished session
    Tick,
    /// Change a mode's duration by a number of minutes
    Adjust {
        /// work, break or long-break
        mode: TimerMode,
        /// Minutes to add (negative to subtract)
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
    /// Print current timer state as JSON
    Status,
}

fn finish(ws: &Workspace<SqliteStore>, engine: &PomodoroEngine, event: Option<TimerEvent>) -> CmdResult {
    ws.save_timer(engine);
    match event {
        Some(event) => print_json(&event),
        None => print_json(&engine.snapshot()),
    }
}

pub fn run(action: TimerAction) -> CmdResult {
    let ws = open_workspace()?;
    let mut engine = ws.timer();
    // Catch up on wall-clock time since the last invocation.
    let completed = engine.tick();
    let is_tick = matches!(action, TimerAction::Tick);

    let event = match action {
        TimerAction::Start => engine.start(),
        TimerAction::Pause => engine.pause(),
        TimerAction::Toggle => engine.toggle(),
        TimerAction::Reset => engine.reset(),
        TimerAction::Tick => completed.clone(),
        TimerAction::Adjust { mode, delta } => {
            let minutes = engine.adjust_duration(mode, delta);
            eprintln!("{} duration: {minutes} min", mode.label());
            None
        }
        TimerAction::Status => None,
    };

    if let Some(TimerEvent::SessionCompleted { mode, next_mode, .. }) = &completed {
        if !is_tick {
            eprintln!("{} finished, {} is up next", mode.label(), next_mode.label());
        }
    }
    finish(&ws, &engine, event)
}
