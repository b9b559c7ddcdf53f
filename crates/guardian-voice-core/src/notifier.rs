/// User-facing status notifications.
pub trait Notifier: Send + Sync {
    /// Listening was switched on or off by the gate.
    fn audio_state_changed(&self, enabled: bool);

    /// An SOS alert went out.
    fn alert_raised(&self);
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn audio_state_changed(&self, enabled: bool) {
        tracing::info!(enabled, "Audio state changed");
    }

    fn alert_raised(&self) {
        tracing::warn!("SOS alert raised");
    }
}
