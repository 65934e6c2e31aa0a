//! Get-sysid command - fetch the system ID for a registered user

use anyhow::Result;
use colored::Colorize;

use super::{get_context, logged, resolve_pin, GlobalArgs, UserArgs};
use crate::output;

pub fn run(global: &GlobalArgs, args: UserArgs, pin: Option<String>) -> Result<()> {
    let ctx = get_context(global)?;
    let user = args.into_user(Some(resolve_pin(pin)?));

    logged("get-sysid", "get_sysid", || Ok(ctx.manager.get_sys_id(&user)?))?;
    output::success(&format!("System ID fetched for user {}", user.id));
    if let Some(pin_file) = ctx.manager.pin_file() {
        println!(
            "{}",
            format!("The PIN is still stored in {}", pin_file.display()).dimmed()
        );
    }

    Ok(())
}
