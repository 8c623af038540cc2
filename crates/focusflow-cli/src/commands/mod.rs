pub mod config;
pub mod event;
pub mod goal;
pub mod memory;
pub mod reminder;
pub mod task;
pub mod theme;
pub mod timer;

use focusflow_core::{Config, SqliteStore, Workspace};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store with the current configuration.
pub fn open_workspace() -> Result<Workspace<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    Ok(Workspace::new(store, config))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
