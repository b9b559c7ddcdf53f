use crate::{CoreResult, recognition::SessionSink};

/// A speech-recognition backend that runs one listening session at a time.
pub trait RecognitionEngine: Send {
    /// Begin a session reporting through `sink`.
    ///
    /// An error means no session was acquired; the controller retries later.
    fn start(&mut self, sink: SessionSink) -> CoreResult<()>;

    /// Ask the active session to stop listening and report what it heard.
    fn stop(&mut self);

    /// Cancel the active session and free its resources. Must be safe to
    /// call with no active session.
    fn release(&mut self);
}

/// Reports whether other audio is playing on the device.
pub trait PlaybackMonitor: Send + Sync {
    /// True while competing playback is active.
    fn is_playback_active(&self) -> bool;
}

/// Monitor for hosts that cannot observe playback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlayback;

impl PlaybackMonitor for NoPlayback {
    fn is_playback_active(&self) -> bool {
        false
    }
}
