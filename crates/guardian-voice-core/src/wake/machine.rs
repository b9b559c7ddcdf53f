use crate::wake::WakePhrase;

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Progress through the wake phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeState {
    /// Nothing heard yet.
    Idle,
    /// First token heard, waiting for the second.
    Armed {
        /// When the first token was heard.
        armed_at: Instant,
    },
}

/// What a single utterance did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No state change.
    Ignored,
    /// First token heard; the window closes at `expires_at`.
    Armed {
        /// Deadline after which the machine falls back to idle.
        expires_at: Instant,
    },
    /// Already armed and the utterance did not carry the second token.
    StillArmed,
    /// The armed window had already elapsed; machine reset without a match.
    Stale {
        /// Time since arming.
        elapsed: Duration,
    },
    /// Wake phrase completed.
    Matched,
}

/// Two-stage wake phrase state machine.
///
/// Purely time-parameterized: callers pass the monotonic `now` for every
/// input, and drive expiry through [`WakeMachine::expiry_deadline`] and
/// [`WakeMachine::expire`].
#[derive(Debug)]
pub struct WakeMachine {
    phrase: WakePhrase,
    max_window: Duration,
    state: WakeState,
}

impl WakeMachine {
    /// Create an idle machine.
    pub fn new(phrase: WakePhrase, max_window: Duration) -> Self {
        Self {
            phrase,
            max_window,
            state: WakeState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> WakeState {
        self.state
    }

    /// Active phrase.
    pub fn phrase(&self) -> &WakePhrase {
        &self.phrase
    }

    /// Replace the phrase. Any partial progress is dropped.
    pub fn set_phrase(&mut self, phrase: WakePhrase) {
        self.phrase = phrase;
        self.reset();
    }

    /// Pending expiry deadline; present exactly while armed.
    pub fn expiry_deadline(&self) -> Option<Instant> {
        match self.state {
            WakeState::Idle => None,
            WakeState::Armed { armed_at } => Some(armed_at + self.max_window),
        }
    }

    /// Back to idle, cancelling the expiry deadline.
    pub fn reset(&mut self) {
        self.state = WakeState::Idle;
    }

    /// Fire the expiry deadline. Returns true if an armed window was closed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expiry_deadline() {
            Some(deadline) if now >= deadline => {
                debug!("Wake window expired, back to idle");
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Feed one normalized utterance.
    pub fn feed(&mut self, heard: &str, now: Instant) -> Transition {
        if self.phrase.is_inert() || heard.is_empty() {
            return Transition::Ignored;
        }

        if self.phrase.in_order(heard) {
            debug!("Both tokens heard in a single utterance");
            self.reset();
            return Transition::Matched;
        }

        match self.state {
            WakeState::Idle => {
                if !self.phrase.has_first(heard) {
                    return Transition::Ignored;
                }
                self.state = WakeState::Armed { armed_at: now };
                let expires_at = now + self.max_window;
                debug!(
                    window_ms = self.max_window.as_millis(),
                    "First token heard, armed"
                );
                Transition::Armed { expires_at }
            }
            WakeState::Armed { armed_at } => {
                let elapsed = now.saturating_duration_since(armed_at);
                if elapsed > self.max_window {
                    debug!(elapsed_ms = elapsed.as_millis(), "Wake window stale, resetting");
                    self.reset();
                    Transition::Stale { elapsed }
                } else if self.phrase.has_second(heard) {
                    debug!(elapsed_ms = elapsed.as_millis(), "Second token heard within window");
                    self.reset();
                    Transition::Matched
                } else {
                    Transition::StillArmed
                }
            }
        }
    }
}
