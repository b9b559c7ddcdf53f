//! Recording fakes for the service collaborators.

use crate::{
    Alert, AlertDispatcher, Coordinates, CoreError, CoreResult, DaySlot, LocationProvider,
    Notifier, PlaybackMonitor, RecognitionEngine, RecognitionEvent, SessionSink, Settings,
    SettingsSource, WallClock,
};

use std::{
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use chrono::Weekday;
use error_location::ErrorLocation;

#[allow(clippy::unwrap_used)]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap()
}

/// What the fake engine was asked to do.
#[derive(Default)]
pub struct EngineLog {
    pub sinks: Vec<SessionSink>,
    pub stops: usize,
    pub releases: usize,
}

/// Engine that records calls and hands its sinks to the test.
#[derive(Clone, Default)]
pub struct FakeEngine {
    log: Arc<Mutex<EngineLog>>,
    failures_left: Arc<AtomicUsize>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the next `count` starts.
    pub fn fail_next_starts(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub fn starts(&self) -> usize {
        lock(&self.log).sinks.len()
    }

    pub fn stops(&self) -> usize {
        lock(&self.log).stops
    }

    pub fn releases(&self) -> usize {
        lock(&self.log).releases
    }

    /// Sink of the most recent session.
    pub fn last_sink(&self) -> Option<SessionSink> {
        lock(&self.log).sinks.last().cloned()
    }

    /// Report `event` on the most recent session.
    pub fn emit(&self, event: RecognitionEvent) -> bool {
        self.last_sink().is_some_and(|sink| sink.send(event))
    }

    pub fn boxed(&self) -> Box<dyn RecognitionEngine> {
        Box::new(self.clone())
    }
}

impl RecognitionEngine for FakeEngine {
    fn start(&mut self, sink: SessionSink) -> CoreResult<()> {
        let refused = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(CoreError::SessionUnavailable {
                reason: "busy".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        lock(&self.log).sinks.push(sink);
        Ok(())
    }

    fn stop(&mut self) {
        lock(&self.log).stops += 1;
    }

    fn release(&mut self) {
        lock(&self.log).releases += 1;
    }
}

/// Playback monitor the test can flip.
#[derive(Default)]
pub struct FakePlayback(AtomicBool);

impl FakePlayback {
    pub fn set(&self, playing: bool) {
        self.0.store(playing, Ordering::SeqCst);
    }
}

impl PlaybackMonitor for FakePlayback {
    fn is_playback_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Dispatcher that keeps every alert and counts follow-up cancellations.
#[derive(Default)]
pub struct RecordingDispatcher {
    alerts: Mutex<Vec<Alert>>,
    cancels: AtomicUsize,
}

impl RecordingDispatcher {
    pub fn alerts(&self) -> Vec<Alert> {
        lock(&self.alerts).clone()
    }

    pub fn follow_up_cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl AlertDispatcher for RecordingDispatcher {
    fn dispatch(&self, alert: Alert) {
        lock(&self.alerts).push(alert);
    }

    fn cancel_follow_up(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that keeps every audio state change.
#[derive(Default)]
pub struct RecordingNotifier {
    states: Mutex<Vec<bool>>,
    alerts: AtomicUsize,
}

impl RecordingNotifier {
    pub fn states(&self) -> Vec<bool> {
        lock(&self.states).clone()
    }

    pub fn alerts(&self) -> usize {
        self.alerts.load(Ordering::SeqCst)
    }
}

impl Notifier for RecordingNotifier {
    fn audio_state_changed(&self, enabled: bool) {
        lock(&self.states).push(enabled);
    }

    fn alert_raised(&self) {
        self.alerts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Wall clock pinned to a settable slot.
pub struct FixedClock(Mutex<DaySlot>);

impl FixedClock {
    pub fn at(weekday: Weekday, hour: u32, minute: u32) -> Self {
        Self(Mutex::new(DaySlot::new(weekday, hour, minute)))
    }

    pub fn set(&self, weekday: Weekday, hour: u32, minute: u32) {
        *lock(&self.0) = DaySlot::new(weekday, hour, minute);
    }
}

impl WallClock for FixedClock {
    fn now_slot(&self) -> DaySlot {
        *lock(&self.0)
    }
}

/// Settings store the test can rewrite between gate cycles.
#[derive(Default)]
pub struct SharedSettings(Mutex<Settings>);

impl SharedSettings {
    pub fn new(settings: Settings) -> Self {
        Self(Mutex::new(settings))
    }

    pub fn set(&self, settings: Settings) {
        *lock(&self.0) = settings;
    }
}

impl SettingsSource for SharedSettings {
    fn load(&self) -> CoreResult<Settings> {
        Ok(lock(&self.0).clone())
    }
}

/// Settings store that cannot be read.
pub struct BrokenSettings;

impl SettingsSource for BrokenSettings {
    fn load(&self) -> CoreResult<Settings> {
        Err(CoreError::SettingsUnavailable {
            reason: "store locked".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Location pinned to one point.
pub struct FixedLocation(pub Option<Coordinates>);

impl LocationProvider for FixedLocation {
    fn last_known(&self) -> Option<Coordinates> {
        self.0
    }
}
