use tokio::sync::oneshot;

/// Control commands accepted by the listening service.
#[derive(Debug)]
pub enum ServiceCommand {
    /// Resume a stopped service: reload the wake phrase and re-run the gate.
    Start,
    /// Stop listening, cancel timers and pause the gate until `Start`.
    Stop,
    /// Reply with a status snapshot.
    Status(oneshot::Sender<ServiceStatus>),
    /// Tear down and end the run loop.
    Shutdown,
}

/// Point-in-time view of the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Service accepts gate decisions (not stopped).
    pub running: bool,
    /// Listening is logically enabled.
    pub listening: bool,
    /// A recognition session is live.
    pub session_active: bool,
    /// Hibernation in effect at the last gate evaluation.
    pub hibernating: bool,
    /// First token heard, waiting for the second.
    pub armed: bool,
    /// Normalized wake tokens.
    pub wake_phrase: (String, String),
}
