use crate::config::{default_contact_name, default_desktop_notifications, default_timeout_secs};

use serde::{Deserialize, Serialize};

/// Alert delivery configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Name used in alerts when the settings file has none.
    #[serde(default = "default_contact_name")]
    pub contact_name: String,

    /// URLs that receive every alert as a JSON POST.
    #[serde(default)]
    pub webhooks: Vec<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Show desktop notifications for state changes and alerts.
    #[serde(default = "default_desktop_notifications")]
    pub desktop_notifications: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            contact_name: default_contact_name(),
            webhooks: Vec::new(),
            timeout_secs: default_timeout_secs(),
            desktop_notifications: default_desktop_notifications(),
        }
    }
}
