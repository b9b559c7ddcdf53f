use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Weekday};

/// A weekday plus minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySlot {
    /// Day of the week.
    pub weekday: Weekday,
    /// Minutes since midnight, 0..1440.
    pub minute_of_day: u32,
}

impl DaySlot {
    /// Slot at `hour:minute` on `weekday`.
    pub fn new(weekday: Weekday, hour: u32, minute: u32) -> Self {
        Self {
            weekday,
            minute_of_day: hour * 60 + minute,
        }
    }

    /// Slot containing `at`.
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self::new(at.weekday(), at.hour(), at.minute())
    }
}

/// Source of local wall-clock time for the hibernation schedule.
pub trait WallClock: Send + Sync {
    /// Current slot.
    fn now_slot(&self) -> DaySlot;
}

/// System local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now_slot(&self) -> DaySlot {
        DaySlot::at(&Local::now())
    }
}
