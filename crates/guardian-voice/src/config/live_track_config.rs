use crate::config::{default_live_track_interval_secs, default_live_track_max_duration_secs};

use serde::{Deserialize, Serialize};

/// Live location sharing after an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveTrackConfig {
    /// Base URL of the live-track backend. Tracking is off when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Seconds between location updates.
    #[serde(default = "default_live_track_interval_secs")]
    pub interval_secs: u64,

    /// How long a tracking session keeps sending updates.
    #[serde(default = "default_live_track_max_duration_secs")]
    pub max_duration_secs: u64,
}

impl Default for LiveTrackConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            interval_secs: default_live_track_interval_secs(),
            max_duration_secs: default_live_track_max_duration_secs(),
        }
    }
}
