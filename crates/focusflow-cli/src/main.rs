use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusflow-cli", version, about = "FocusFlow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calendar events
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Priority board tasks
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Daily goals, streaks and completion rates
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Memory notes
    Memory {
        #[command(subcommand)]
        action: commands::memory::MemoryAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Scheduled reminders
    Reminder {
        #[command(subcommand)]
        action: commands::reminder::ReminderAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Light/dark theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FOCUSFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Memory { action } => commands::memory::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Reminder { action } => commands::reminder::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Theme { action } => commands::theme::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
