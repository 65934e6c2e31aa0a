//! CLI command implementations

pub mod add_user;
pub mod config;
pub mod get_sysid;
pub mod logs;
pub mod reset;
pub mod setup;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Password;

use aqbank_core::config::Config;
use aqbank_core::{AqBankContext, LogEvent, LoggingService, User};

/// Options that override the stored configuration
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// aqhbci configuration directory (passed to the tool as -C)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,
    /// PIN staging file used by get-sysid
    #[arg(long, global = true)]
    pub pin_file: Option<PathBuf>,
    /// aqhbci-tool4 program name or path
    #[arg(long, global = true)]
    pub tool: Option<String>,
}

/// HBCI user fields; empty fields are left to the tool's defaults
#[derive(Args, Debug)]
pub struct UserArgs {
    /// HBCI user ID
    #[arg(short = 'u', long, env = "AQ_USER_ID")]
    pub user_id: Option<String>,
    /// Bank code (BLZ)
    #[arg(short = 'b', long, env = "AQ_BANK_CODE")]
    pub bank_code: Option<String>,
    /// Display name for the user
    #[arg(short = 'N', long, env = "AQ_USER_NAME")]
    pub name: Option<String>,
    /// HBCI server URL
    #[arg(short = 's', long, env = "AQ_SERVER_URL")]
    pub server_url: Option<String>,
    /// Security token type (e.g. pintan)
    #[arg(short = 't', long, env = "AQ_TOKEN_TYPE")]
    pub token_type: Option<String>,
    /// HBCI protocol version (e.g. 300)
    #[arg(long, env = "AQ_HBCI_VERSION")]
    pub hbci_version: Option<String>,
    /// HTTP version to force in the user settings, as major.minor
    #[arg(long, env = "AQ_HTTP_VERSION", default_value = "1.1")]
    pub http_version: String,
}

impl UserArgs {
    pub fn into_user(self, pin: Option<String>) -> User {
        User {
            id: self.user_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            bank_code: self.bank_code.unwrap_or_default(),
            server_url: self.server_url.unwrap_or_default(),
            token_type: self.token_type.unwrap_or_default(),
            hbci_version: self.hbci_version.unwrap_or_default(),
            http_version: self.http_version,
            pin: pin.unwrap_or_default(),
        }
    }
}

/// Get the aqbank state directory from environment or default
pub fn get_state_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("AQBANK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".aqbank"))
        .context("Could not find home directory")
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let state_dir = get_state_dir().ok()?;
    std::fs::create_dir_all(&state_dir).ok()?;
    LoggingService::new(&state_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Run `f`, logging `<event>_started`, `<event>_completed` or `<event>_failed`
pub fn logged<T>(command: &str, event: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let logger = get_logger();
    log_event(&logger, LogEvent::new(format!("{}_started", event)).with_command(command));

    let result = f();
    match &result {
        Ok(_) => log_event(
            &logger,
            LogEvent::new(format!("{}_completed", event)).with_command(command),
        ),
        Err(e) => {
            let mut failed = LogEvent::new(format!("{}_failed", event))
                .with_command(command)
                .with_error(e.to_string());
            if let Some(aqbank_core::Error::ExternalTool { output, .. }) =
                e.downcast_ref::<aqbank_core::Error>()
            {
                failed = failed.with_error_details(output.clone());
            }
            log_event(&logger, failed);
        }
    }
    result
}

/// Load the configuration and apply command-line overrides
pub fn get_config(global: &GlobalArgs) -> Result<Config> {
    let state_dir = get_state_dir()?;
    let mut config = Config::load(&state_dir)
        .with_context(|| format!("Failed to load settings from {}", state_dir.display()))?;

    if let Some(dir) = &global.config_dir {
        config.config_dir = Some(dir.clone());
    }
    if let Some(pin_file) = &global.pin_file {
        config.pin_file = Some(pin_file.clone());
    }
    if let Some(tool) = &global.tool {
        config.tool = tool.clone();
    }
    Ok(config)
}

/// Build the aqbank context for the current invocation
pub fn get_context(global: &GlobalArgs) -> Result<AqBankContext> {
    Ok(AqBankContext::new(get_config(global)?))
}

/// Use the given PIN or prompt for it without echo
pub fn resolve_pin(pin: Option<String>) -> Result<String> {
    match pin {
        Some(pin) => Ok(pin),
        None => Ok(Password::new().with_prompt("PIN").interact()?),
    }
}
