use chrono::{Local, NaiveDate};
use clap::Subcommand;
use focusflow_core::calendar::{default_event_color, Event, NewEvent, RecurrenceKind};
use focusflow_core::dates::{combine, format_date, format_time, parse_time};

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum EventAction {
    /// Add an event
    Add {
        /// Event title
        title: String,
        /// Day of the event (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
        /// Hex color
        #[arg(long)]
        color: Option<String>,
        /// Repeat daily, weekly or monthly
        #[arg(long)]
        repeat: Option<RecurrenceKind>,
    },
    /// List events visible on a day, or in its week
    List {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Show Monday..Sunday around the day
        #[arg(long)]
        week: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete an event and all its occurrences
    Delete {
        /// Event ID
        id: String,
    },
}

pub fn run(action: EventAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        EventAction::Add {
            title,
            date,
            start,
            end,
            color,
            repeat,
        } => {
            let date = date.unwrap_or_else(|| ws.today());
            let input = NewEvent {
                title,
                color: color.unwrap_or_else(|| default_event_color().to_string()),
                start_time: combine(date, parse_time(&start)?, &Local)?,
                end_time: combine(date, parse_time(&end)?, &Local)?,
                recurrence: repeat,
            };
            let event = ws.add_event(input)?;
            println!("Event created: {}", event.id);
        }
        EventAction::List { date, week, json } => {
            let date = date.unwrap_or_else(|| ws.today());
            let days = if week {
                ws.week(date)
            } else {
                vec![(date, ws.events_on(date))]
            };

            if json {
                let out: Vec<serde_json::Value> = days
                    .iter()
                    .map(|(day, events)| serde_json::json!({ "date": day, "events": events }))
                    .collect();
                return print_json(&out);
            }
            for (day, events) in &days {
                println!("{}", format_date(*day));
                if events.is_empty() {
                    println!("  (no events)");
                }
                for event in events {
                    println!("  {}", describe(event));
                }
            }
        }
        EventAction::Delete { id } => {
            ws.delete_event(&id)?;
            println!("Event deleted: {id}");
        }
    }
    Ok(())
}

fn describe(event: &Event) -> String {
    let repeat = event
        .recurrence()
        .map(|kind| format!(" ({})", kind.as_str()))
        .unwrap_or_default();
    format!(
        "{}-{}  {}{}  [{}]",
        format_time(&event.start_time, &Local),
        format_time(&event.end_time, &Local),
        event.title,
        repeat,
        event.id
    )
}
