use crate::{schedule::DaySlot, settings::Settings};

use chrono::Weekday;

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Daily quiet window `[start, end)` in minutes after midnight.
///
/// `end <= start` wraps past midnight; `start == end` is empty. A negative
/// bound means the window was never configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HibernationWindow {
    start_minute: i64,
    end_minute: i64,
}

impl HibernationWindow {
    /// Window from raw bounds.
    pub fn new(start_minute: i64, end_minute: i64) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Both bounds set.
    pub fn is_configured(&self) -> bool {
        self.start_minute >= 0 && self.end_minute >= 0
    }

    /// Whether `minute_of_day` falls inside the window.
    pub fn contains(&self, minute_of_day: u32) -> bool {
        if !self.is_configured() {
            return false;
        }
        let now = i64::from(minute_of_day);
        let (start, end) = (self.start_minute, self.end_minute);

        if start == end {
            false
        } else if end > start {
            start <= now && now < end
        } else {
            now >= start || now < end
        }
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Global audio switch.
    pub audio_enabled: bool,
    /// Manual hibernation toggle.
    pub manual_hibernation: bool,
    /// Schedule currently inside a quiet window.
    pub auto_hibernation: bool,
    /// Whether listening should run.
    pub logical_enabled: bool,
}

impl GateDecision {
    /// Manual or scheduled hibernation in effect.
    pub fn hibernation_active(&self) -> bool {
        self.manual_hibernation || self.auto_hibernation
    }
}

/// Inputs to the gate, read fresh from settings each cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Global audio switch.
    pub audio_enabled: bool,
    /// Manual hibernation toggle.
    pub manual_hibernation: bool,
    /// Weekly schedule in force.
    pub auto_schedule_enabled: bool,
    /// Schedule days, Monday first.
    pub day_on: [bool; 7],
    /// Quiet window shared by all scheduled days.
    pub window: HibernationWindow,
}

impl ScheduleConfig {
    /// Read the gate inputs from a settings snapshot.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            audio_enabled: settings.audio_enabled(),
            manual_hibernation: settings.manual_hibernation(),
            auto_schedule_enabled: settings.auto_hibernation_enabled(),
            day_on: WEEK.map(|day| settings.hibernation_day_on(day)),
            window: HibernationWindow::new(
                settings.hibernation_start_minutes(),
                settings.hibernation_end_minutes(),
            ),
        }
    }

    /// Whether the schedule is on for `day`.
    pub fn is_day_on(&self, day: Weekday) -> bool {
        self.day_on[day.num_days_from_monday() as usize]
    }

    /// Whether the weekly schedule puts the service to sleep at `slot`.
    pub fn auto_hibernation_active(&self, slot: DaySlot) -> bool {
        self.auto_schedule_enabled
            && self.is_day_on(slot.weekday)
            && self.window.contains(slot.minute_of_day)
    }

    /// Compute the gate decision for `slot`.
    pub fn evaluate(&self, slot: DaySlot) -> GateDecision {
        let auto_hibernation = self.auto_hibernation_active(slot);
        let hibernation = self.manual_hibernation || auto_hibernation;

        GateDecision {
            audio_enabled: self.audio_enabled,
            manual_hibernation: self.manual_hibernation,
            auto_hibernation,
            logical_enabled: self.audio_enabled && !hibernation,
        }
    }
}
