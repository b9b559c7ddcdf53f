mod clock;
mod config;
mod gate;

pub use {
    clock::{DaySlot, LocalClock, WallClock},
    config::{GateDecision, HibernationWindow, ScheduleConfig},
    gate::{GateTransition, HibernationGate},
};

use std::time::Duration;

/// How often the gate re-reads settings.
pub const DEFAULT_GATE_INTERVAL: Duration = Duration::from_secs(5);
