use clap::Subcommand;

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MemoryAction {
    /// Save a note
    Add {
        /// Note title
        title: String,
        /// Note body
        content: String,
    },
    /// List notes with a short preview
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

pub fn run(action: MemoryAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        MemoryAction::Add { title, content } => {
            let item = ws.add_memory_item(&title, &content)?;
            println!("Memory item created: {}", item.id);
        }
        MemoryAction::List { json } => {
            let items = ws.memory_items();
            if json {
                return print_json(&items);
            }
            for item in &items {
                println!("{}  [{}]", item.title, item.id);
                println!("  {}", item.preview());
            }
        }
        MemoryAction::Delete { id } => {
            ws.delete_memory_item(&id)?;
            println!("Memory item deleted: {id}");
        }
    }
    Ok(())
}
