use clap::Subcommand;
use focusflow_core::priorities::{tasks_in, Quadrant};

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to a quadrant
    Add {
        /// Task title
        title: String,
        /// urgent-important, important-not-urgent, urgent-not-important or neither
        #[arg(long, short)]
        quadrant: Quadrant,
    },
    /// Show the board
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Complete {
        /// Task ID
        id: String,
    },
    /// Move a task to another quadrant
    Move {
        /// Task ID
        id: String,
        /// Target quadrant
        quadrant: Quadrant,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        TaskAction::Add { title, quadrant } => {
            let task = ws.add_task(&title, quadrant)?;
            println!("Task created: {}", task.id);
        }
        TaskAction::List { all, json } => {
            let tasks = if all { ws.tasks() } else { ws.active_tasks() };
            if json {
                return print_json(&tasks);
            }
            for quadrant in Quadrant::ALL {
                println!("{} ({})", quadrant.title(), quadrant.advice());
                let in_quadrant: Vec<_> = if all {
                    tasks.iter().filter(|t| t.quadrant == quadrant).collect()
                } else {
                    tasks_in(&tasks, quadrant)
                };
                for task in in_quadrant {
                    let mark = if task.completed { "x" } else { " " };
                    println!("  [{mark}] {}  [{}]", task.title, task.id);
                }
            }
        }
        TaskAction::Complete { id } => {
            ws.complete_task(&id)?;
            println!("Task completed: {id}");
        }
        TaskAction::Move { id, quadrant } => {
            ws.move_task(&id, quadrant)?;
            println!("Task moved to {}: {id}", quadrant.key());
        }
        TaskAction::Delete { id } => {
            ws.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
