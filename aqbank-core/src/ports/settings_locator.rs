//! Settings locator port - find a user's settings file

use std::path::{Path, PathBuf};

use crate::domain::result::Result;

/// Finds the aqhbci settings file that belongs to a user
///
/// The manager only needs "which file do I patch"; how the file is
/// identified is up to the implementation.
pub trait SettingsLocator: Send + Sync {
    /// Locate the settings file for `(user_id, bank_code)` below `config_dir`
    ///
    /// Returns `Error::NotFound` when no file matches.
    fn locate(&self, config_dir: &Path, user_id: &str, bank_code: &str) -> Result<PathBuf>;

    /// All user settings files below `config_dir`, in lookup order
    fn list(&self, config_dir: &Path) -> Result<Vec<PathBuf>>;
}
