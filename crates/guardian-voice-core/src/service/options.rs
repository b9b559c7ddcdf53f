use crate::{
    AlertDispatcher, LocationProvider, Notifier, PlaybackMonitor, RecognitionEngine, SettingsSource,
    WallClock,
    recognition::RestartDelays,
    schedule::DEFAULT_GATE_INTERVAL,
    wake::{
        DEFAULT_FIRST_TOKEN, DEFAULT_MAX_WINDOW, DEFAULT_MIN_ALERT_INTERVAL, DEFAULT_SECOND_TOKEN,
        WakePhrase,
    },
};

use std::{sync::Arc, time::Duration};

/// Name used in alerts when the settings store has none.
pub const DEFAULT_CONTACT_NAME: &str = "nome";

/// Tunables for [`ListeningService`](crate::ListeningService).
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    /// Wake phrase used when the settings store has no usable tokens.
    pub default_phrase: WakePhrase,
    /// How long the first token keeps the machine armed.
    pub max_window: Duration,
    /// Minimum spacing between dispatched alerts.
    pub min_alert_interval: Duration,
    /// Gate re-evaluation period.
    pub gate_interval: Duration,
    /// Session restart delays.
    pub restart_delays: RestartDelays,
    /// Name used in alerts when the settings store has none.
    pub contact_name: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            default_phrase: WakePhrase::new(DEFAULT_FIRST_TOKEN, DEFAULT_SECOND_TOKEN),
            max_window: DEFAULT_MAX_WINDOW,
            min_alert_interval: DEFAULT_MIN_ALERT_INTERVAL,
            gate_interval: DEFAULT_GATE_INTERVAL,
            restart_delays: RestartDelays::default(),
            contact_name: DEFAULT_CONTACT_NAME.to_string(),
        }
    }
}

/// Everything outside the core the service talks to.
pub struct Collaborators {
    /// Speech-recognition backend.
    pub engine: Box<dyn RecognitionEngine>,
    /// Competing playback detector.
    pub playback: Arc<dyn PlaybackMonitor>,
    /// Host preference store.
    pub settings: Arc<dyn SettingsSource>,
    /// Alert delivery.
    pub dispatcher: Arc<dyn AlertDispatcher>,
    /// Position for alerts.
    pub location: Arc<dyn LocationProvider>,
    /// User-facing notifications.
    pub notifier: Arc<dyn Notifier>,
    /// Local time for the hibernation schedule.
    pub clock: Arc<dyn WallClock>,
}
