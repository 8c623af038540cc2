use clap::Subcommand;

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the active theme
    Show {
        /// Include the color palette as JSON
        #[arg(long)]
        palette: bool,
    },
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> CmdResult {
    let ws = open_workspace()?;
    match action {
        ThemeAction::Show { palette } => {
            let theme = ws.theme();
            if palette {
                return print_json(&serde_json::json!({
                    "theme": theme,
                    "palette": theme.palette(),
                }));
            }
            println!("{}", theme.as_str());
        }
        ThemeAction::Toggle => {
            println!("{}", ws.toggle_theme().as_str());
        }
    }
    Ok(())
}
