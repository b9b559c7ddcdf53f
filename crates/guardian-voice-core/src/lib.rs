//! Guardian Voice Core Library
//!
//! Always-on wake-phrase listener for a personal-safety app: a restarting
//! speech-recognition loop feeds a two-stage wake-phrase state machine, and a
//! hibernation schedule gates when listening runs. A confirmed phrase
//! dispatches an SOS alert through an [`AlertDispatcher`].
//!
//! # Example
//!
//! ```no_run
//! use guardian_voice_core::{
//!     Collaborators, ListeningService, LocalClock, LogNotifier, NoLocation, NoPlayback,
//!     ServiceCommand, ServiceOptions, Settings, WhisperOptions, WhisperRecognizer,
//! };
//! # use guardian_voice_core::{Alert, AlertDispatcher};
//! # struct Print;
//! # impl AlertDispatcher for Print { fn dispatch(&self, alert: Alert) { println!("{}", alert.message) } }
//!
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> guardian_voice_core::CoreResult<()> {
//!     let engine = WhisperRecognizer::new(WhisperOptions::new("models/ggml-base.bin"))?;
//!     let (command_tx, command_rx) = tokio::sync::mpsc::channel(8);
//!
//!     let service = ListeningService::new(
//!         ServiceOptions::default(),
//!         Collaborators {
//!             engine: Box::new(engine),
//!             playback: Arc::new(NoPlayback),
//!             settings: Arc::new(Settings::new()),
//!             dispatcher: Arc::new(Print),
//!             location: Arc::new(NoLocation),
//!             notifier: Arc::new(LogNotifier),
//!             clock: Arc::new(LocalClock),
//!         },
//!         command_rx,
//!     );
//!
//!     let handle = tokio::spawn(service.run());
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     let _ = command_tx.send(ServiceCommand::Shutdown).await;
//!     let _ = handle.await;
//!     Ok(())
//! }
//! ```

mod alert;
mod audio;
mod error;
mod notifier;
mod recognition;
mod schedule;
mod service;
mod settings;
mod wake;

pub use {
    alert::{
        Alert, AlertDispatcher, Coordinates, LocationProvider, NoLocation, build_alert_text,
        map_url,
    },
    audio::{WhisperOptions, WhisperRecognizer},
    error::{CoreError, Result as CoreResult},
    notifier::{LogNotifier, Notifier},
    recognition::{
        LoopController, NoPlayback, PlaybackMonitor, RecognitionEngine, RecognitionEvent,
        RestartDelays, SessionEvent, SessionSink,
    },
    schedule::{
        DEFAULT_GATE_INTERVAL, DaySlot, GateDecision, GateTransition, HibernationGate,
        HibernationWindow, LocalClock, ScheduleConfig, WallClock,
    },
    service::{
        Collaborators, DEFAULT_CONTACT_NAME, ListeningService, ServiceCommand, ServiceOptions,
        ServiceStatus,
    },
    settings::{SettingValue, Settings, SettingsSource},
    wake::{
        AlertDebounce, DEFAULT_FIRST_TOKEN, DEFAULT_MAX_WINDOW, DEFAULT_MIN_ALERT_INTERVAL,
        DEFAULT_SECOND_TOKEN, Detection, Transition, WakeDetector, WakeMachine, WakePhrase,
        WakeState, normalize,
    },
};

#[cfg(test)]
mod tests;
