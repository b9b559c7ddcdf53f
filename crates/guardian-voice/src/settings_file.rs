//! Host preference store backed by a flat TOML file.
//!
//! The file is re-read on every load so edits made by other tools (or the
//! user) take effect on the next gate cycle without a restart.

use guardian_voice_core::{
    Coordinates, CoreError, CoreResult, LocationProvider, PlaybackMonitor, SettingValue, Settings,
    SettingsSource,
};

use std::{
    fs, io,
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
};

use error_location::ErrorLocation;
use toml::{Table, Value};
use tracing::{debug, instrument, warn};

/// `key = value` preferences file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct TomlSettingsFile {
    path: PathBuf,
}

impl TomlSettingsFile {
    /// Store reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this store reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for TomlSettingsFile {
    #[track_caller]
    #[instrument(skip(self), fields(path = ?self.path))]
    fn load(&self) -> CoreResult<Settings> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Settings file missing, using defaults");
                return Ok(Settings::new());
            }
            Err(e) => {
                return Err(CoreError::SettingsUnavailable {
                    reason: format!("Failed to read settings file: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let table: Table = toml::from_str(&contents).map_err(|e| CoreError::SettingsUnavailable {
            reason: format!("Failed to parse settings file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(table
            .into_iter()
            .filter_map(|(key, value)| match setting_value(value) {
                Some(value) => Some((key, value)),
                None => {
                    debug!(key = %key, "Ignoring non-scalar setting");
                    None
                }
            })
            .collect())
    }
}

/// Scalar TOML values map onto settings; tables, arrays and datetimes do not.
pub(crate) fn setting_value(value: Value) -> Option<SettingValue> {
    match value {
        Value::Boolean(b) => Some(SettingValue::Bool(b)),
        Value::Integer(n) => Some(SettingValue::Int(n)),
        Value::Float(f) => Some(SettingValue::Float(f)),
        Value::String(s) => Some(SettingValue::Text(s)),
        Value::Datetime(_) | Value::Array(_) | Value::Table(_) => None,
    }
}

fn load_or_empty(source: &TomlSettingsFile) -> Settings {
    source.load().unwrap_or_else(|e| {
        warn!(error = ?e, "Settings unavailable, using defaults");
        Settings::new()
    })
}

/// Reads the `mediaPlaying` flag the host writes to the settings file.
#[derive(Debug, Clone)]
pub struct SettingsPlaybackMonitor {
    source: Arc<TomlSettingsFile>,
}

impl SettingsPlaybackMonitor {
    /// Monitor over `source`.
    pub fn new(source: Arc<TomlSettingsFile>) -> Self {
        Self { source }
    }
}

impl PlaybackMonitor for SettingsPlaybackMonitor {
    fn is_playback_active(&self) -> bool {
        load_or_empty(&self.source).media_playing()
    }
}

/// Reads the last coordinates the host wrote to the settings file.
#[derive(Debug, Clone)]
pub struct SettingsLocation {
    source: Arc<TomlSettingsFile>,
}

impl SettingsLocation {
    /// Location provider over `source`.
    pub fn new(source: Arc<TomlSettingsFile>) -> Self {
        Self { source }
    }
}

impl LocationProvider for SettingsLocation {
    fn last_known(&self) -> Option<Coordinates> {
        load_or_empty(&self.source).last_location()
    }
}
