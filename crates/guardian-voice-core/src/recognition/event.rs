use tokio::sync::mpsc;
use uuid::Uuid;

/// Something a recognition session reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Interim best guess; more may follow.
    Partial(String),
    /// Final best guess; the session is done.
    Final(String),
    /// The speaker stopped and nothing further will be transcribed.
    EndOfSpeech,
    /// The engine failed; the session is done.
    Error(String),
}

impl RecognitionEvent {
    /// Whether this event ends the session.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecognitionEvent::Partial(_))
    }
}

/// A [`RecognitionEvent`] tagged with the session that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Session identifier.
    pub session_id: Uuid,
    /// What happened.
    pub event: RecognitionEvent,
}

/// Handle an engine uses to report events for one session.
///
/// Cheap to clone and usable from any thread. Events sent after the
/// session was released are dropped by the loop controller.
#[derive(Debug, Clone)]
pub struct SessionSink {
    session_id: Uuid,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionSink {
    /// Sink for `session_id`.
    pub fn new(session_id: Uuid, tx: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self { session_id, tx }
    }

    /// Session this sink reports for.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Report `event`. Returns false once the service has gone away.
    pub fn send(&self, event: RecognitionEvent) -> bool {
        self.tx
            .send(SessionEvent {
                session_id: self.session_id,
                event,
            })
            .is_ok()
    }
}
