mod dispatch_config;
mod live_track_config;
mod logging_config;
#[allow(clippy::module_inception)]
mod config;
mod recognition_config;
mod schedule_config;
mod settings_config;
mod wake_config;

pub(crate) use {
    config::Config, dispatch_config::DispatchConfig, live_track_config::LiveTrackConfig,
    logging_config::LoggingConfig,
    recognition_config::RecognitionConfig, schedule_config::ScheduleConfig,
    settings_config::SettingsConfig, wake_config::WakeConfig,
};

use guardian_voice_core::{
    DEFAULT_CONTACT_NAME, DEFAULT_FIRST_TOKEN, DEFAULT_GATE_INTERVAL, DEFAULT_MAX_WINDOW,
    DEFAULT_MIN_ALERT_INTERVAL, DEFAULT_SECOND_TOKEN,
};

use std::path::PathBuf;

pub(crate) const DEFAULT_LANGUAGE: &str = "pt";
pub(crate) const DEFAULT_UTTERANCE_SECS: u64 = 4;
pub(crate) const DEFAULT_USE_GPU: bool = true;
pub(crate) const DEFAULT_MODEL_FILE: &str = "models/ggml-base.bin";
pub(crate) const DEFAULT_SETTINGS_FILE: &str = "settings.toml";
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_DESKTOP_NOTIFICATIONS: bool = true;
pub(crate) const DEFAULT_LIVE_TRACK_INTERVAL_SECS: u64 = 15;
pub(crate) const DEFAULT_LIVE_TRACK_MAX_DURATION_SECS: u64 = 30 * 60;

pub(crate) fn default_first_token() -> String {
    DEFAULT_FIRST_TOKEN.to_string()
}

pub(crate) fn default_second_token() -> String {
    DEFAULT_SECOND_TOKEN.to_string()
}

pub(crate) fn default_window_ms() -> u64 {
    DEFAULT_MAX_WINDOW.as_millis() as u64
}

pub(crate) fn default_alert_interval_ms() -> u64 {
    DEFAULT_MIN_ALERT_INTERVAL.as_millis() as u64
}

pub(crate) fn default_model_path() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_FILE)
}

pub(crate) fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

pub(crate) fn default_utterance_secs() -> u64 {
    DEFAULT_UTTERANCE_SECS
}

pub(crate) fn default_use_gpu() -> bool {
    DEFAULT_USE_GPU
}

pub(crate) fn default_interval_secs() -> u64 {
    DEFAULT_GATE_INTERVAL.as_secs()
}

pub(crate) fn default_settings_path() -> PathBuf {
    PathBuf::from(DEFAULT_SETTINGS_FILE)
}

pub(crate) fn default_contact_name() -> String {
    DEFAULT_CONTACT_NAME.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

pub(crate) fn default_desktop_notifications() -> bool {
    DEFAULT_DESKTOP_NOTIFICATIONS
}

pub(crate) fn default_live_track_interval_secs() -> u64 {
    DEFAULT_LIVE_TRACK_INTERVAL_SECS
}

pub(crate) fn default_live_track_max_duration_secs() -> u64 {
    DEFAULT_LIVE_TRACK_MAX_DURATION_SECS
}
