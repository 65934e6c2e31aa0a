//! aqbank core - HBCI user profile management on top of aqhbci-tool4
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (User, Account, HttpVersion) and errors
//! - **ports**: Trait definitions for external dependencies (CommandRunner, SettingsLocator)
//! - **services**: Profile management, status and event logging
//! - **adapters**: Concrete implementations (child process, settings file scan)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
mod log_migrations;

use std::sync::Arc;

use adapters::process::ProcessRunner;
use config::Config;

// Re-export commonly used types at crate root
pub use domain::{Account, HttpVersion, User};
pub use domain::result::Error;
pub use services::{
    LogEntry, LogEvent, LoggingService, ProfileManager, StatusReport, StatusService,
};

/// Main context for aqbank operations
///
/// Wires the profile manager to the real aqhbci-tool4 process using the
/// loaded configuration.
pub struct AqBankContext {
    pub config: Config,
    pub manager: Arc<ProfileManager>,
    pub status_service: StatusService,
}

impl AqBankContext {
    pub fn new(config: Config) -> Self {
        let runner = Arc::new(ProcessRunner::new(config.tool.clone()));
        let manager = Arc::new(ProfileManager::new(
            config.config_dir.clone(),
            config.pin_file.clone(),
            runner,
        ));
        let status_service = StatusService::new(Arc::clone(&manager));

        Self {
            config,
            manager,
            status_service,
        }
    }
}
