//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Child processes for the CommandRunner port
//! - Directory scan with substring matching for the SettingsLocator port

pub mod process;
pub mod settings_file;
