//! Settings file adapter - locate aqhbci user settings by content
//!
//! aqhbci-tool4 stores one file per user under `settings/users/*.conf`
//! with generated names, so the only handle on "which file is this user"
//! is the file content. A file matches when it contains both the user ID and
//! the bank code. Substring matching can pick an unrelated file whose
//! content happens to contain both strings; the first file in path order
//! wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::result::{Error, Result};
use crate::ports::SettingsLocator;

/// Directory of per-user settings files relative to the config dir
pub fn users_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("settings").join("users")
}

/// Finds settings files by substring containment of ID and bank code
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringSettingsLocator;

impl SubstringSettingsLocator {
    pub fn new() -> Self {
        Self
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|w| w == needle)
}

impl SettingsLocator for SubstringSettingsLocator {
    fn locate(&self, config_dir: &Path, user_id: &str, bank_code: &str) -> Result<PathBuf> {
        for file in self.list(config_dir)? {
            // Unreadable candidates don't abort the search
            let Ok(data) = fs::read(&file) else {
                continue;
            };
            if contains(&data, user_id.as_bytes()) && contains(&data, bank_code.as_bytes()) {
                return Ok(file);
            }
        }

        Err(Error::not_found(format!(
            "failed to locate user file in {}",
            users_dir(config_dir).display()
        )))
    }

    fn list(&self, config_dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(users_dir(config_dir)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().ends_with(".conf"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();

        Ok(files)
    }
}
