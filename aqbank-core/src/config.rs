//! Configuration management
//!
//! Stored as `settings.json` in the aqbank state directory:
//! ```json
//! {
//!   "configDir": "/home/me/.aqbank/aqconf",
//!   "pinFile": "/home/me/.aqbank/aqpin",
//!   "tool": "aqhbci-tool4"
//! }
//! ```
//! Keys this crate does not manage are preserved on save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::process::DEFAULT_TOOL;

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pin_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool: Option<String>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// aqbank configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// aqhbci configuration directory passed as `-C`
    pub config_dir: Option<PathBuf>,
    /// PIN staging file passed as `-P`
    pub pin_file: Option<PathBuf>,
    /// External tool program name or path
    pub tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: None,
            pin_file: None,
            tool: DEFAULT_TOOL.to_string(),
        }
    }
}

/// Keys accepted by [`Config::set`]
pub const CONFIG_KEYS: &[&str] = &["config_dir", "pin_file", "tool"];

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Config {
    /// Load config from the state directory, then apply environment overrides
    ///
    /// `AQBANK_CONFIG_DIR`, `AQBANK_PIN_FILE` and `AQBANK_TOOL` take
    /// precedence over the settings file. An empty variable is ignored.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(state_dir)?;

        if let Some(dir) = non_empty(std::env::var("AQBANK_CONFIG_DIR").ok()) {
            config.config_dir = Some(PathBuf::from(dir));
        }
        if let Some(pin) = non_empty(std::env::var("AQBANK_PIN_FILE").ok()) {
            config.pin_file = Some(PathBuf::from(pin));
        }
        if let Some(tool) = non_empty(std::env::var("AQBANK_TOOL").ok()) {
            config.tool = tool;
        }

        Ok(config)
    }

    /// Load config from settings.json only, without environment overrides
    pub fn load_file(state_dir: &Path) -> Result<Self> {
        let raw = read_settings(state_dir)?;

        Ok(Self {
            config_dir: non_empty(raw.config_dir).map(PathBuf::from),
            pin_file: non_empty(raw.pin_file).map(PathBuf::from),
            tool: non_empty(raw.tool).unwrap_or_else(|| DEFAULT_TOOL.to_string()),
        })
    }

    /// Save config to the state directory
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        let mut settings = read_settings(state_dir)?;

        settings.config_dir = self
            .config_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        settings.pin_file = self
            .pin_file
            .as_ref()
            .map(|p| p.to_string_lossy().to_string());
        settings.tool = if self.tool == DEFAULT_TOOL {
            None
        } else {
            Some(self.tool.clone())
        };

        std::fs::create_dir_all(state_dir)
            .with_context(|| format!("Failed to create {}", state_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(state_dir.join("settings.json"), content)?;
        Ok(())
    }

    /// Set one key by name; an empty value resets it to the default
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = non_empty(Some(value.to_string()));
        match key {
            "config_dir" => self.config_dir = value.map(PathBuf::from),
            "pin_file" => self.pin_file = value.map(PathBuf::from),
            "tool" => self.tool = value.unwrap_or_else(|| DEFAULT_TOOL.to_string()),
            _ => bail!(
                "Unknown config key: {}. Available: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn read_settings(state_dir: &Path) -> Result<SettingsFile> {
    let settings_path = state_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    // A corrupt file falls back to defaults rather than blocking the CLI
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
