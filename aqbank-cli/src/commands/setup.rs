//! Setup command - add a user and fetch its system ID in one go

use anyhow::Result;

use super::{get_context, logged, resolve_pin, GlobalArgs, UserArgs};
use crate::output;

pub fn run(global: &GlobalArgs, args: UserArgs, pin: Option<String>, reset: bool) -> Result<()> {
    let ctx = get_context(global)?;
    let user = args.into_user(Some(resolve_pin(pin)?));

    logged("setup", "setup", || {
        if reset {
            ctx.manager.reset()?;
        }
        ctx.manager.add_user(&user)?;
        ctx.manager.get_sys_id(&user)?;
        Ok(())
    })?;

    output::success(&format!("User {} is set up", user.id));
    Ok(())
}
