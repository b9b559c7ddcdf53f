use crate::wake::{AlertDebounce, Transition, WakeMachine, WakePhrase, WakeState, normalize};

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Outcome of one recognized utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Nothing relevant heard.
    Ignored,
    /// First token heard.
    Armed,
    /// Still waiting for the second token.
    Waiting,
    /// Window had elapsed; progress dropped.
    Stale,
    /// Wake phrase complete and the alert should go out.
    Triggered,
    /// Wake phrase complete but too soon after the previous alert.
    Suppressed,
}

/// Wake machine plus alert debounce, fed with raw transcripts.
#[derive(Debug)]
pub struct WakeDetector {
    machine: WakeMachine,
    debounce: AlertDebounce,
}

impl WakeDetector {
    /// Create an idle detector.
    pub fn new(phrase: WakePhrase, max_window: Duration, min_alert_interval: Duration) -> Self {
        Self {
            machine: WakeMachine::new(phrase, max_window),
            debounce: AlertDebounce::new(min_alert_interval),
        }
    }

    /// Normalize `raw` and advance the machine.
    #[instrument(skip(self, raw))]
    pub fn on_utterance(&mut self, raw: &str, now: Instant) -> Detection {
        let heard = normalize(raw);
        if heard.is_empty() {
            return Detection::Ignored;
        }
        debug!(heard = %heard, "Utterance");

        match self.machine.feed(&heard, now) {
            Transition::Ignored => Detection::Ignored,
            Transition::Armed { .. } => Detection::Armed,
            Transition::StillArmed => Detection::Waiting,
            Transition::Stale { .. } => Detection::Stale,
            Transition::Matched => {
                if self.debounce.try_fire(now) {
                    info!("Wake phrase confirmed");
                    Detection::Triggered
                } else {
                    debug!("Duplicate wake phrase within debounce interval, ignoring");
                    Detection::Suppressed
                }
            }
        }
    }

    /// Close an expired window. Returns true if the machine was reset.
    pub fn expire(&mut self, now: Instant) -> bool {
        self.machine.expire(now)
    }

    /// Pending window expiry, if armed.
    pub fn expiry_deadline(&self) -> Option<Instant> {
        self.machine.expiry_deadline()
    }

    /// Current machine state.
    pub fn state(&self) -> WakeState {
        self.machine.state()
    }

    /// Active phrase.
    pub fn phrase(&self) -> &WakePhrase {
        self.machine.phrase()
    }

    /// Swap in a new phrase, dropping partial progress.
    pub fn set_phrase(&mut self, phrase: WakePhrase) {
        if *self.machine.phrase() != phrase {
            info!(first = phrase.first(), second = phrase.second(), "Wake phrase updated");
            self.machine.set_phrase(phrase);
        }
    }

    /// Drop partial progress, keeping debounce history.
    pub fn disarm(&mut self) {
        self.machine.reset();
    }

    /// Drop progress and debounce history.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.debounce.reset();
    }
}
