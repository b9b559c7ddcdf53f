//! The single actor that owns every piece of mutable listening state.
//!
//! Commands, session events, the gate tick, the restart deadline and the
//! wake-window deadline all arrive through one `select!` loop, so the wake
//! machine, debounce and loop controller are never touched concurrently.

use crate::{
    Alert, AlertDispatcher, LocationProvider, Notifier, SettingsSource, WallClock,
    alert::build_alert_text,
    recognition::{LoopController, SessionEvent},
    schedule::{GateDecision, GateTransition, HibernationGate, ScheduleConfig},
    service::{Collaborators, ServiceCommand, ServiceOptions, ServiceStatus},
    settings::Settings,
    wake::{Detection, WakeDetector, WakeState},
};

use std::sync::Arc;

use tokio::{
    sync::mpsc,
    time::{Instant, MissedTickBehavior, sleep_until},
};
use tracing::{debug, info, instrument, warn};

/// Whether the run loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Background wake-phrase listener.
///
/// Construct once per service lifetime and drive with [`ListeningService::run`].
pub struct ListeningService {
    options: ServiceOptions,
    controller: LoopController,
    detector: WakeDetector,
    gate: HibernationGate,
    settings: Arc<dyn SettingsSource>,
    dispatcher: Arc<dyn AlertDispatcher>,
    location: Arc<dyn LocationProvider>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn WallClock>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    command_rx: mpsc::Receiver<ServiceCommand>,
    running: bool,
    last_decision: Option<GateDecision>,
}

impl ListeningService {
    /// Wire the service to its collaborators and control channel.
    pub fn new(
        options: ServiceOptions,
        collaborators: Collaborators,
        command_rx: mpsc::Receiver<ServiceCommand>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let controller = LoopController::new(
            collaborators.engine,
            collaborators.playback,
            options.restart_delays,
            events_tx,
        );
        let detector = WakeDetector::new(
            options.default_phrase.clone(),
            options.max_window,
            options.min_alert_interval,
        );

        Self {
            options,
            controller,
            detector,
            gate: HibernationGate::new(),
            settings: collaborators.settings,
            dispatcher: collaborators.dispatcher,
            location: collaborators.location,
            notifier: collaborators.notifier,
            clock: collaborators.clock,
            events_rx,
            command_rx,
            running: true,
            last_decision: None,
        }
    }

    /// Run until a `Shutdown` command arrives or the control channel closes.
    #[instrument(skip(self))]
    pub async fn run(mut self) {
        info!("Listening service starting");

        self.reload_phrase();
        self.evaluate_gate("startup");

        let mut gate_tick = tokio::time::interval(self.options.gate_interval);
        gate_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately; startup already evaluated.
        gate_tick.tick().await;

        loop {
            let restart_at = self.controller.restart_deadline();
            let expiry_at = self.detector.expiry_deadline();

            // Transcripts before the expiry arm: one landing exactly on the
            // window deadline still completes the phrase.
            tokio::select! {
                biased;

                cmd = self.command_rx.recv() => {
                    let flow = match cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => {
                            info!("Control channel closed");
                            Flow::Exit
                        }
                    };
                    if flow == Flow::Exit {
                        break;
                    }
                }

                Some(event) = self.events_rx.recv() => {
                    self.handle_session_event(event);
                }

                _ = sleep_until_opt(expiry_at) => {
                    self.detector.expire(Instant::now());
                }

                _ = sleep_until_opt(restart_at) => {
                    self.controller.poll_restart(Instant::now());
                }

                _ = gate_tick.tick() => {
                    if self.running {
                        self.evaluate_gate("timer");
                    }
                }
            }
        }

        self.teardown();
        info!("Listening service stopped");
    }

    fn handle_command(&mut self, cmd: ServiceCommand) -> Flow {
        match cmd {
            ServiceCommand::Start => {
                if !self.running {
                    info!("Start requested");
                    self.running = true;
                }
                self.reload_phrase();
                self.evaluate_gate("start command");
            }
            ServiceCommand::Stop => {
                info!("Stop requested");
                self.running = false;
                self.teardown();
                self.gate.forget();
            }
            ServiceCommand::Status(reply) => {
                if reply.send(self.status()).is_err() {
                    debug!("Status requester went away");
                }
            }
            ServiceCommand::Shutdown => {
                info!("Shutdown requested");
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        let now = Instant::now();
        let Some(transcript) = self.controller.on_event(event, now) else {
            return;
        };

        if self.detector.on_utterance(&transcript, now) == Detection::Triggered {
            self.raise_alert();
        }
    }

    #[instrument(skip(self))]
    fn raise_alert(&self) {
        let settings = self.load_settings();
        let name = settings
            .contact_name()
            .unwrap_or(self.options.contact_name.as_str());
        let coordinates = self.location.last_known();
        let message = build_alert_text(name, coordinates);

        info!(has_location = coordinates.is_some(), "Dispatching SOS alert");

        self.notifier.alert_raised();
        self.dispatcher.dispatch(Alert {
            contact_name: name.to_string(),
            message,
            coordinates,
        });
    }

    #[instrument(skip(self))]
    fn evaluate_gate(&mut self, reason: &str) {
        let settings = self.load_settings();
        let slot = self.clock.now_slot();
        let decision = ScheduleConfig::from_settings(&settings).evaluate(slot);

        debug!(
            reason,
            audio_enabled = decision.audio_enabled,
            manual_hibernation = decision.manual_hibernation,
            auto_hibernation = decision.auto_hibernation,
            logical_enabled = decision.logical_enabled,
            "Gate evaluated"
        );
        self.last_decision = Some(decision);

        let Some(transition) = self.gate.apply(decision.logical_enabled) else {
            return;
        };

        info!(
            reason,
            ?transition,
            hibernation_active = decision.hibernation_active(),
            "Applying audio state"
        );

        match transition {
            GateTransition::Enable => {
                self.controller.enable(Instant::now());
                self.notifier.audio_state_changed(true);
            }
            GateTransition::Disable => {
                self.controller.disable();
                self.detector.disarm();
                self.notifier.audio_state_changed(false);
            }
        }
    }

    fn reload_phrase(&mut self) {
        let phrase = self
            .load_settings()
            .wake_phrase()
            .unwrap_or_else(|| self.options.default_phrase.clone());
        self.detector.set_phrase(phrase);
    }

    fn load_settings(&self) -> Settings {
        self.settings.load().unwrap_or_else(|e| {
            warn!(error = ?e, "Settings unavailable, using defaults");
            Settings::new()
        })
    }

    fn teardown(&mut self) {
        self.controller.disable();
        self.detector.reset();
        self.dispatcher.cancel_follow_up();
    }

    fn status(&self) -> ServiceStatus {
        let phrase = self.detector.phrase();
        ServiceStatus {
            running: self.running,
            listening: self.controller.is_enabled(),
            session_active: self.controller.session().is_some(),
            hibernating: self
                .last_decision
                .is_some_and(|decision| decision.hibernation_active()),
            armed: matches!(self.detector.state(), WakeState::Armed { .. }),
            wake_phrase: (phrase.first().to_string(), phrase.second().to_string()),
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
