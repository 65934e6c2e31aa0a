//! Config command - show or change stored settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_state_dir;
use crate::output;
use aqbank_core::config::Config;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a setting (config_dir, pin_file, tool); an empty value resets it
    Set {
        key: String,
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let state_dir = get_state_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&state_dir)?;
            let config_dir = config.config_dir.map(|p| p.display().to_string());
            let pin_file = config.pin_file.map(|p| p.display().to_string());

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "state_dir": state_dir.display().to_string(),
                        "config_dir": config_dir,
                        "pin_file": pin_file,
                        "tool": config.tool,
                    })
                );
            } else {
                let unset = || "(not set)".dimmed().to_string();
                println!("{}", "Configuration".bold());
                println!("  State dir:  {}", state_dir.display());
                println!("  Config dir: {}", config_dir.unwrap_or_else(unset));
                println!("  PIN file:   {}", pin_file.unwrap_or_else(unset));
                println!("  Tool:       {}", config.tool);
            }
        }
        ConfigCommands::Set { key, value } => {
            // Environment overrides must not end up in settings.json
            let mut config = Config::load_file(&state_dir)?;
            config.set(&key, &value)?;
            config.save(&state_dir)?;
            output::success(&format!("Saved {}", key));
        }
    }

    Ok(())
}
