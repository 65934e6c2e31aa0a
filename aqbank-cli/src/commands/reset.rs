//! Reset command - delete the aqhbci configuration directory and PIN file

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::{get_context, logged, GlobalArgs};
use crate::output;

pub fn run(global: &GlobalArgs, force: bool) -> Result<()> {
    let ctx = get_context(global)?;

    // Without a config dir the manager refuses; no point in asking first
    if let Some(config_dir) = ctx.manager.config_dir() {
        if !force {
            println!(
                "\n{}",
                format!("This will delete {} and every user in it.", config_dir.display()).yellow()
            );
            if let Some(pin_file) = ctx.manager.pin_file() {
                println!("{}", format!("The PIN file {} is removed too.", pin_file.display()).dimmed());
            }
            println!();

            if !Confirm::new()
                .with_prompt("Are you sure?")
                .default(false)
                .interact()?
            {
                println!("{}\n", "Cancelled".dimmed());
                return Ok(());
            }
        }
    }

    logged("reset", "reset", || Ok(ctx.manager.reset()?))?;
    output::success("Configuration reset");

    Ok(())
}
