use crate::{CoreResult, settings::SettingValue};

use std::collections::HashMap;

/// Snapshot of the host app's key/value preferences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    /// Empty snapshot; every reader returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`Settings::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coerced boolean, `default` when absent.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, SettingValue::as_bool)
    }

    /// Coerced integer, `default` when absent or unparseable.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(SettingValue::as_int).unwrap_or(default)
    }

    /// Coerced float.
    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(SettingValue::as_float)
    }

    /// Non-blank text.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SettingValue::as_text)
    }
}

impl FromIterator<(String, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Read-only access to the host's preference store.
///
/// Called on every gate cycle, so implementations should return fresh data.
pub trait SettingsSource: Send + Sync {
    /// Load the current snapshot.
    fn load(&self) -> CoreResult<Settings>;
}

impl SettingsSource for Settings {
    fn load(&self) -> CoreResult<Settings> {
        Ok(self.clone())
    }
}
