//! Desktop notifications for listening state changes and alerts.

use guardian_voice_core::Notifier;

use notify_rust::Notification;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

const APP_NAME: &str = "Guardian Voice";

pub(crate) const AUDIO_ON_TEXT: &str = "Audio Anjo da Guarda modo ativado";
pub(crate) const AUDIO_OFF_TEXT: &str = "Audio Anjo da Guarda modo desativado";
pub(crate) const ALERT_TEXT: &str = "🚨 SOS: Alerta confirmado";

/// Shows a desktop notification for every state change and alert.
///
/// Notifications are shown on the blocking pool; some platforms block on a
/// D-Bus round trip.
pub struct DesktopNotifier {
    enabled: bool,
    runtime: Handle,
}

impl DesktopNotifier {
    /// Notifier posting on `runtime`. When `enabled` is false it only logs.
    pub fn new(enabled: bool, runtime: Handle) -> Self {
        Self { enabled, runtime }
    }

    fn show(&self, body: &'static str) {
        if !self.enabled {
            debug!(body, "Desktop notifications disabled");
            return;
        }

        self.runtime.spawn_blocking(move || {
            if let Err(e) = Notification::new()
                .appname(APP_NAME)
                .summary(APP_NAME)
                .body(body)
                .show()
            {
                warn!(error = ?e, "Failed to show desktop notification");
            }
        });
    }
}

impl Notifier for DesktopNotifier {
    fn audio_state_changed(&self, enabled: bool) {
        info!(enabled, "Audio state changed");
        self.show(if enabled { AUDIO_ON_TEXT } else { AUDIO_OFF_TEXT });
    }

    fn alert_raised(&self) {
        warn!("SOS alert confirmed");
        self.show(ALERT_TEXT);
    }
}
