use crate::config::{
    default_alert_interval_ms, default_first_token, default_second_token, default_window_ms,
};

use serde::{Deserialize, Serialize};

/// Wake phrase fallback and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeConfig {
    /// First token, used when the settings file has none.
    #[serde(default = "default_first_token")]
    pub first_token: String,

    /// Second token, used when the settings file has none.
    #[serde(default = "default_second_token")]
    pub second_token: String,

    /// How long the first token keeps the machine armed.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,

    /// Minimum spacing between two alerts.
    #[serde(default = "default_alert_interval_ms")]
    pub alert_interval_ms: u64,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            first_token: default_first_token(),
            second_token: default_second_token(),
            window_ms: default_window_ms(),
            alert_interval_ms: default_alert_interval_ms(),
        }
    }
}
