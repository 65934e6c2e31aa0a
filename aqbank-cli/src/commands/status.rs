//! Status command - show configuration paths and registered users

use anyhow::Result;
use colored::Colorize;

use aqbank_core::StatusReport;

use super::{get_context, GlobalArgs};
use crate::output;

fn missing_tool_warning(status: &StatusReport) -> Option<String> {
    match status.tool_path {
        Some(_) => None,
        None => Some(format!("{} was not found on PATH", status.tool)),
    }
}

fn or_unset(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "(not set)".dimmed().to_string())
}

pub fn run(global: &GlobalArgs, json: bool) -> Result<()> {
    let ctx = get_context(global)?;
    let status = ctx.status_service.status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "aqbank status".bold());
    println!(
        "  Tool:       {} {}",
        output::flag(status.tool_path.is_some()),
        status.tool_path.as_deref().unwrap_or(&status.tool)
    );
    println!(
        "  Config dir: {} {}",
        output::flag(status.config_dir_exists),
        or_unset(&status.config_dir)
    );
    println!(
        "  PIN file:   {} {}",
        output::flag(status.pin_file_exists),
        or_unset(&status.pin_file)
    );
    println!();

    if let Some(warning) = missing_tool_warning(&status) {
        output::warning(&warning);
    }

    if status.user_files.is_empty() {
        println!("{}", "No user settings files found.".dimmed());
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["User settings file"]);
    for file in &status.user_files {
        table.add_row(vec![file.as_str()]);
    }
    println!("{}", table);

    Ok(())
}
