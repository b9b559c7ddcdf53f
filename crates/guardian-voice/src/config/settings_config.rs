use crate::config::default_settings_path;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Location of the shared preference file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Key/value TOML file holding the user's preferences. Relative paths are
    /// resolved against the config directory.
    #[serde(default = "default_settings_path")]
    pub path: PathBuf,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}
