//! Status service - summary of the local aqhbci setup

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::services::profile::ProfileManager;

/// Snapshot of configuration paths and what exists on disk
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub tool: String,
    /// Resolved location of the tool on PATH, if found
    pub tool_path: Option<String>,
    pub config_dir: Option<String>,
    pub config_dir_exists: bool,
    pub pin_file: Option<String>,
    pub pin_file_exists: bool,
    pub user_files: Vec<String>,
}

/// Status service for the `status` command
pub struct StatusService {
    manager: Arc<ProfileManager>,
}

impl StatusService {
    pub fn new(manager: Arc<ProfileManager>) -> Self {
        Self { manager }
    }

    pub fn status(&self) -> Result<StatusReport> {
        let tool = self.manager.program().to_string();
        let tool_path = which::which(&tool)
            .ok()
            .map(|p| p.to_string_lossy().to_string());

        let config_dir = self.manager.config_dir();
        let pin_file = self.manager.pin_file();

        let user_files = self
            .manager
            .settings_files()?
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        Ok(StatusReport {
            tool,
            tool_path,
            config_dir: config_dir.map(|p| p.to_string_lossy().to_string()),
            config_dir_exists: config_dir.map(|p| p.is_dir()).unwrap_or(false),
            pin_file: pin_file.map(|p| p.to_string_lossy().to_string()),
            pin_file_exists: pin_file.map(|p| p.is_file()).unwrap_or(false),
            user_files,
        })
    }
}
