mod debounce;
mod detector;
mod machine;
mod normalize;
mod phrase;

pub use {
    debounce::AlertDebounce,
    detector::{Detection, WakeDetector},
    machine::{Transition, WakeMachine, WakeState},
    normalize::normalize,
    phrase::WakePhrase,
};

use std::time::Duration;

/// First token used when the settings store has none.
pub const DEFAULT_FIRST_TOKEN: &str = "socorro";
/// Second token used when the settings store has none.
pub const DEFAULT_SECOND_TOKEN: &str = "anjo";
/// How long the first token keeps the machine armed.
pub const DEFAULT_MAX_WINDOW: Duration = Duration::from_millis(2000);
/// Minimum spacing between two dispatched alerts.
pub const DEFAULT_MIN_ALERT_INTERVAL: Duration = Duration::from_millis(5000);
