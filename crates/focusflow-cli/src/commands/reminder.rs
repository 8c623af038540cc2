use chrono::{Local, Utc};
use clap::Subcommand;
use focusflow_core::notifications::{reschedule_all, Trigger};
use focusflow_core::RecordingScheduler;

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Show every reminder the current data and config would schedule
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ReminderAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        ReminderAction::List { json } => {
            let mut scheduler = RecordingScheduler::new();
            let config = &ws.config().reminders;
            reschedule_all(&mut scheduler, &ws.memory_items(), config, Utc::now(), &Local);

            let reminders: Vec<_> = scheduler.reminders().collect();
            if json {
                return print_json(&reminders);
            }
            if reminders.is_empty() {
                println!("No reminders scheduled");
            }
            for reminder in reminders {
                let when = match &reminder.trigger {
                    Trigger::Once { at } => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
                    Trigger::Daily { hour, minute } => format!("daily {hour:02}:{minute:02}"),
                    Trigger::Weekly {
                        weekday,
                        hour,
                        minute,
                    } => format!("every {weekday} {hour:02}:{minute:02}"),
                };
                println!("{when:<18} {}", reminder.body);
            }
        }
    }
    Ok(())
}
