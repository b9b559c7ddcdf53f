//! Keeps a recognition session alive for as long as listening is enabled.

use crate::recognition::{
    PlaybackMonitor, RecognitionEngine, RecognitionEvent, SessionEvent, SessionSink,
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::Instant};
use tracing::{debug, info, instrument, trace, warn};
use uuid::Uuid;

/// Delays before a new session is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartDelays {
    /// After a final result.
    pub after_result: Duration,
    /// After an engine error.
    pub after_error: Duration,
    /// After end of speech with no result pending.
    pub after_end_of_speech: Duration,
    /// After the engine refused to start a session.
    pub after_failure: Duration,
    /// While other audio is playing.
    pub playback_backoff: Duration,
}

impl Default for RestartDelays {
    fn default() -> Self {
        Self {
            after_result: Duration::from_millis(400),
            after_error: Duration::from_millis(1000),
            after_end_of_speech: Duration::from_millis(800),
            after_failure: Duration::from_millis(800),
            playback_backoff: Duration::from_millis(3000),
        }
    }
}

/// Restarting driver around a [`RecognitionEngine`].
///
/// Owns at most one session. Time is passed in by the caller, and the
/// pending restart is exposed as a deadline for the caller's event loop to
/// sleep on (see [`LoopController::restart_deadline`]).
pub struct LoopController {
    engine: Box<dyn RecognitionEngine>,
    playback: Arc<dyn PlaybackMonitor>,
    delays: RestartDelays,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    enabled: bool,
    session: Option<Uuid>,
    restart_at: Option<Instant>,
}

impl LoopController {
    /// Controller that reports session events into `events_tx`. Starts disabled.
    pub fn new(
        engine: Box<dyn RecognitionEngine>,
        playback: Arc<dyn PlaybackMonitor>,
        delays: RestartDelays,
        events_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            engine,
            playback,
            delays,
            events_tx,
            enabled: false,
            session: None,
            restart_at: None,
        }
    }

    /// Whether listening is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current session, if one is running.
    pub fn session(&self) -> Option<Uuid> {
        self.session
    }

    /// When the next session should start, if a restart is pending.
    pub fn restart_deadline(&self) -> Option<Instant> {
        self.restart_at
    }

    /// Enable listening and start a session. No-op if already enabled.
    #[instrument(skip(self))]
    pub fn enable(&mut self, now: Instant) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        info!("Listening enabled");
        self.start_listening(now);
    }

    /// Disable listening, releasing the session and any pending restart.
    /// No-op if already disabled.
    #[instrument(skip(self))]
    pub fn disable(&mut self) {
        self.restart_at = None;
        if self.session.is_some() {
            self.engine.stop();
        }
        self.release_session();

        if self.enabled {
            self.enabled = false;
            info!("Listening disabled");
        }
    }

    /// Start the pending session if its deadline has passed.
    pub fn poll_restart(&mut self, now: Instant) -> bool {
        match self.restart_at {
            Some(at) if now >= at => {
                self.start_listening(now);
                true
            }
            _ => false,
        }
    }

    /// Handle a session event, returning the transcript to feed to the
    /// wake detector, if any.
    pub fn on_event(&mut self, event: SessionEvent, now: Instant) -> Option<String> {
        if !self.enabled || self.session != Some(event.session_id) {
            trace!(session_id = %event.session_id, "Dropping event from released session");
            return None;
        }

        match event.event {
            RecognitionEvent::Partial(text) => self.accept_transcript(text, now),
            RecognitionEvent::Final(text) => {
                let transcript = self.accept_transcript(text, now);
                if transcript.is_some() {
                    self.schedule_restart(self.delays.after_result, now);
                }
                transcript
            }
            RecognitionEvent::EndOfSpeech => {
                if self.restart_at.is_none() {
                    self.schedule_restart(self.delays.after_end_of_speech, now);
                }
                None
            }
            RecognitionEvent::Error(reason) => {
                debug!(session_id = %event.session_id, reason = %reason, "Recognition error");
                self.schedule_restart(self.delays.after_error, now);
                None
            }
        }
    }

    fn accept_transcript(&mut self, text: String, now: Instant) -> Option<String> {
        if self.playback.is_playback_active() {
            debug!("Media playing, pausing recognition");
            self.engine.stop();
            self.release_session();
            self.schedule_restart(self.delays.playback_backoff, now);
            return None;
        }
        Some(text)
    }

    fn start_listening(&mut self, now: Instant) {
        self.restart_at = None;
        if !self.enabled {
            return;
        }

        self.release_session();

        if self.playback.is_playback_active() {
            debug!("Media playing, deferring recognition");
            self.schedule_restart(self.delays.playback_backoff, now);
            return;
        }

        let session_id = Uuid::new_v4();
        let sink = SessionSink::new(session_id, self.events_tx.clone());

        match self.engine.start(sink) {
            Ok(()) => {
                self.session = Some(session_id);
                debug!(session_id = %session_id, "Recognition session started");
            }
            Err(e) => {
                warn!(error = ?e, "Failed to start recognition session, retrying");
                self.schedule_restart(self.delays.after_failure, now);
            }
        }
    }

    fn release_session(&mut self) {
        if let Some(session_id) = self.session.take() {
            self.engine.release();
            debug!(session_id = %session_id, "Recognition session released");
        }
    }

    fn schedule_restart(&mut self, delay: Duration, now: Instant) {
        if !self.enabled {
            return;
        }
        self.restart_at = Some(now + delay);
        trace!(delay_ms = delay.as_millis(), "Restart scheduled");
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        self.restart_at = None;
        self.release_session();
    }
}
