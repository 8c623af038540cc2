pub mod collections;
pub mod config;
pub mod kv;

pub use collections::{load_collection, save_collection};
pub use config::Config;
pub use kv::{KvStore, MemoryStore, SqliteStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Fixed, namespaced keys for each stored collection.
pub mod keys {
    pub const EVENTS: &str = "@focusflow_events";
    pub const TASKS: &str = "@focusflow_tasks";
    pub const GOALS: &str = "@focusflow_goals";
    pub const DAILY_PROGRESS: &str = "@focusflow_daily_progress";
    pub const MEMORY: &str = "@focusflow_memory";
    pub const POMODORO: &str = "@focusflow_pomodoro";
    pub const TIMER: &str = "@focusflow_timer";
    pub const THEME: &str = "@focusflow_theme";
}

/// Returns `~/.config/focusflow[-dev]/` based on FOCUSFLOW_ENV.
///
/// Set FOCUSFLOW_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusflow-dev")
    } else {
        base_dir.join("focusflow")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
