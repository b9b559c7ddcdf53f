//! Logical preferences read through every key spelling the host has used.

use crate::{alert::Coordinates, settings::Settings, wake::WakePhrase};

use chrono::Weekday;

fn weekday_suffix(day: Weekday) -> (&'static str, &'static str) {
    match day {
        Weekday::Mon => ("mon", "Mon"),
        Weekday::Tue => ("tue", "Tue"),
        Weekday::Wed => ("wed", "Wed"),
        Weekday::Thu => ("thu", "Thu"),
        Weekday::Fri => ("fri", "Fri"),
        Weekday::Sat => ("sat", "Sat"),
        Weekday::Sun => ("sun", "Sun"),
    }
}

impl Settings {
    /// First non-negative value among `keys`, otherwise -1.
    fn first_bound(&self, keys: &[&str]) -> i64 {
        keys.iter()
            .map(|key| self.int_or(key, -1))
            .find(|value| *value >= 0)
            .unwrap_or(-1)
    }

    fn first_text(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.text(key))
    }

    fn first_float(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|key| self.float(key))
    }

    /// Global audio switch from the app settings. On unless turned off.
    pub fn audio_enabled(&self) -> bool {
        self.bool_or("audioEnabled", true) || self.bool_or("audio_enabled", false)
    }

    /// Manual hibernation toggle.
    pub fn manual_hibernation(&self) -> bool {
        [
            "hibernationOn",
            "hibernation_on",
            "hibernationEnabled",
            "hibernation_enabled",
        ]
        .iter()
        .any(|key| self.bool_or(key, false))
    }

    /// Whether the weekly hibernation schedule is in force.
    pub fn auto_hibernation_enabled(&self) -> bool {
        self.bool_or("hibernationAutoEnabled", false)
            || self.bool_or("hibernation_auto_enabled", false)
    }

    /// Whether the schedule applies on `day`.
    pub fn hibernation_day_on(&self, day: Weekday) -> bool {
        let (lower, title) = weekday_suffix(day);
        self.bool_or(&format!("hibernation_{lower}"), false)
            || self.bool_or(&format!("hibernation{title}"), false)
    }

    /// Window start in minutes after midnight, -1 when unset.
    pub fn hibernation_start_minutes(&self) -> i64 {
        self.first_bound(&["hibernationStartMinutes", "hibernation_start_minutes"])
    }

    /// Window end in minutes after midnight, -1 when unset.
    pub fn hibernation_end_minutes(&self) -> i64 {
        self.first_bound(&["hibernationEndMinutes", "hibernation_end_minutes"])
    }

    /// Wake phrase configured by the user, if both tokens are usable.
    pub fn wake_phrase(&self) -> Option<WakePhrase> {
        let first = self.first_text(&["audioToken1", "audio_token_1"])?;
        let second = self.first_text(&["audioToken2", "audio_token_2"])?;
        WakePhrase::try_new(first, second)
    }

    /// Name shown in alert messages.
    pub fn contact_name(&self) -> Option<&str> {
        self.first_text(&[
            "nomeCompleto",
            "nome_completo",
            "userFullName",
            "user_name",
            "fullName",
            "full_name",
        ])
        .map(str::trim)
    }

    /// Last location the host recorded.
    pub fn last_location(&self) -> Option<Coordinates> {
        let latitude = self.first_float(&["lastLatitude", "last_latitude"])?;
        let longitude = self.first_float(&["lastLongitude", "last_longitude"])?;
        Coordinates::new(latitude, longitude)
    }

    /// Whether the host reports media currently playing.
    pub fn media_playing(&self) -> bool {
        self.bool_or("mediaPlaying", false) || self.bool_or("media_playing", false)
    }
}
