//! Configuration management for guardian-voice.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, lazy validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        DispatchConfig, LiveTrackConfig, LoggingConfig, RecognitionConfig, ScheduleConfig,
        SettingsConfig, WakeConfig,
    },
};

use guardian_voice_core::{RestartDelays, ServiceOptions, WakePhrase, WhisperOptions};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Wake phrase fallback and timing.
    #[serde(default)]
    pub wake: WakeConfig,
    /// Whisper recognizer settings.
    #[serde(default)]
    pub recognition: RecognitionConfig,
    /// Hibernation gate timing.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Shared preference file.
    #[serde(default)]
    pub settings: SettingsConfig,
    /// Alert delivery.
    #[serde(default)]
    pub dispatch: DispatchConfig,
    /// Live location sharing after an alert.
    #[serde(default)]
    pub live_track: LiveTrackConfig,
    /// Log file output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating a
    /// default file if none exists.
    ///
    /// Note: This does NOT validate the model path exists. Call
    /// `validate_model_path()` before creating the recognizer.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let dirs = Self::project_dirs()?;
        let config_dir = dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Self::load_from(&config_dir.join("config.toml"), dirs.data_dir())
    }

    /// Load configuration from `config_path`, writing defaults there if the
    /// file is missing. Relative paths are resolved: the settings file
    /// against the config file's directory, the model and log directory
    /// against `data_dir`.
    #[track_caller]
    #[instrument]
    pub fn load_from(config_path: &Path, data_dir: &Path) -> AppResult<Self> {
        let config = if config_path.exists() {
            let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to parse config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            info!(config_path = ?config_path, "Configuration loaded");
            config
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(config_path)?;
            warn!(
                model_path = ?data_dir.join(&config.recognition.model_path),
                "Default config created. Whisper model must be downloaded before listening."
            );
            config
        };

        let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolved(config_dir, data_dir))
    }

    /// Validate that the Whisper model file exists at the configured path.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn validate_model_path(&self) -> AppResult<()> {
        if !self.recognition.model_path.exists() {
            return Err(AppError::ConfigError {
                reason: format!(
                    "Whisper model not found at: {:?}. Download a ggml model or set recognition.model_path.",
                    self.recognition.model_path
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Service tunables derived from this config.
    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            default_phrase: WakePhrase::new(&self.wake.first_token, &self.wake.second_token),
            max_window: Duration::from_millis(self.wake.window_ms),
            min_alert_interval: Duration::from_millis(self.wake.alert_interval_ms),
            gate_interval: Duration::from_secs(self.schedule.interval_secs.max(1)),
            restart_delays: RestartDelays::default(),
            contact_name: self.dispatch.contact_name.clone(),
        }
    }

    /// Recognizer options derived from this config.
    pub fn whisper_options(&self) -> WhisperOptions {
        let mut options = WhisperOptions::new(&self.recognition.model_path);
        options.language = self.recognition.language.clone();
        options.use_gpu = self.recognition.use_gpu;
        options.utterance = Duration::from_secs(self.recognition.utterance_secs.max(1));
        options
    }

    fn resolved(mut self, config_dir: &Path, data_dir: &Path) -> Self {
        self.settings.path = resolve(config_dir, &self.settings.path);
        self.recognition.model_path = resolve(data_dir, &self.recognition.model_path);
        self.logging.directory = Some(match &self.logging.directory {
            Some(dir) => resolve(data_dir, dir),
            None => data_dir.join("logs"),
        });
        self
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "anjo-da-guarda", "Guardian-Voice").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
