//! Add-user command - register an HBCI user with aqhbci-tool4

use anyhow::Result;

use super::{get_context, logged, GlobalArgs, UserArgs};
use crate::output;

pub fn run(global: &GlobalArgs, args: UserArgs) -> Result<()> {
    let ctx = get_context(global)?;
    let user = args.into_user(None);

    logged("add-user", "add_user", || Ok(ctx.manager.add_user(&user)?))?;
    output::success(&format!(
        "User {} added with HTTP version {}",
        user.id, user.http_version
    ));
    println!("Run 'aqb get-sysid' to fetch the system ID.");

    Ok(())
}
