use chrono::NaiveDate;
use clap::Subcommand;
use focusflow_core::dates::format_date;
use focusflow_core::goals::{is_completed_on, TREND_DAYS};

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a daily goal
    Add {
        /// Goal title
        title: String,
        /// Optional category
        #[arg(long)]
        category: Option<String>,
    },
    /// List goals with their state for a day
    List {
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a goal's completion for a day
    Toggle {
        /// Goal ID
        id: String,
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Streaks and completion rate for one goal
    Stats {
        /// Goal ID
        id: String,
    },
    /// Aggregate numbers for a day
    Summary {
        /// Day (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Daily completion rate for the days ending on a day
    Trend {
        /// Last day of the window (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Window length in days
        #[arg(long, default_value_t = TREND_DAYS, value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,
    },
    /// Delete a goal and its history
    Delete {
        /// Goal ID
        id: String,
    },
}

pub fn run(action: GoalAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        GoalAction::Add { title, category } => {
            let goal = ws.add_goal(&title, category.as_deref())?;
            println!("Goal created: {}", goal.id);
        }
        GoalAction::List { date, json } => {
            let date = date.unwrap_or_else(|| ws.today());
            let goals = ws.goals();
            let progress = ws.progress();
            if json {
                let out: Vec<serde_json::Value> = goals
                    .iter()
                    .map(|g| {
                        serde_json::json!({
                            "goal": g,
                            "completed": is_completed_on(&g.id, date, &progress),
                        })
                    })
                    .collect();
                return print_json(&out);
            }
            println!("Goals for {}", format_date(date));
            for goal in &goals {
                let mark = if is_completed_on(&goal.id, date, &progress) { "x" } else { " " };
                let category = goal
                    .category
                    .as_deref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default();
                println!("  [{mark}] {}{category}  [{}]", goal.title, goal.id);
            }
        }
        GoalAction::Toggle { id, date } => {
            let date = date.unwrap_or_else(|| ws.today());
            let completed = ws.toggle_goal(&id, date)?;
            let state = if completed { "done" } else { "not done" };
            println!("Goal {id} {state} on {}", format_date(date));
        }
        GoalAction::Stats { id } => {
            if !ws.goals().iter().any(|g| g.id == id) {
                return Err(focusflow_core::CoreError::not_found("goal", id).into());
            }
            print_json(&ws.goal_stats(&id))?;
        }
        GoalAction::Summary { date } => {
            let date = date.unwrap_or_else(|| ws.today());
            print_json(&ws.summary(date))?;
        }
        GoalAction::Trend { date, days } => {
            let date = date.unwrap_or_else(|| ws.today());
            print_json(&ws.trend(date, days))?;
        }
        GoalAction::Delete { id } => {
            let removed = ws.delete_goal(&id)?;
            println!("Goal deleted: {id} ({removed} progress records removed)");
        }
    }
    Ok(())
}
