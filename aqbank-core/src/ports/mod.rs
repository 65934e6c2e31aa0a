//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod command_runner;
mod settings_locator;

pub use command_runner::{CommandOutput, CommandRunner};
pub use settings_locator::SettingsLocator;
