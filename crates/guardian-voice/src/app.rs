//! Process wiring: builds the collaborators, runs the listening service and
//! the control surface, and shuts everything down on `quit` or Ctrl-C.

use crate::{
    AppError, AppResult, ControlHandler, DesktopNotifier, LiveTracker, SettingsLocation,
    SettingsPlaybackMonitor, TomlSettingsFile, WebhookDispatcher, config::Config,
};

use guardian_voice_core::{
    Collaborators, ListeningService, LocalClock, LocationProvider, RecognitionEngine,
    ServiceCommand, WhisperRecognizer,
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tokio::{
    runtime::Handle,
    sync::{mpsc, watch},
};
use tracing::{debug, error, info, instrument, warn};

/// Main application state.
pub struct App {
    /// Loaded configuration with paths resolved.
    pub config: Config,
}

impl App {
    /// Build the collaborators and run until shutdown.
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        self.config.validate_model_path()?;

        let recognizer = WhisperRecognizer::new(self.config.whisper_options())?;
        let collaborators = self.collaborators(Box::new(recognizer))?;

        let (command_tx, command_rx) = mpsc::channel(32);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let service =
            ListeningService::new(self.config.service_options(), collaborators, command_rx);
        let mut service_handle = tokio::spawn(service.run());

        let control = ControlHandler::new(command_tx.clone());
        let control_handle = tokio::spawn(async move {
            if let Err(e) = control.run(shutdown_rx).await {
                error!(error = ?e, "Control handler error");
            }
        });

        info!(
            settings = ?self.config.settings.path,
            webhooks = self.config.dispatch.webhooks.len(),
            live_track = self.config.live_track.base_url.is_some(),
            "Guardian Voice running"
        );

        let service_result = tokio::select! {
            _ = shutdown_signal() => {
                info!("Ctrl-C received, shutting down");
                if command_tx.send(ServiceCommand::Shutdown).await.is_err() {
                    debug!("Service already stopped");
                }
                (&mut service_handle).await
            }
            result = &mut service_handle => result,
        };

        if shutdown_tx.send(true).is_err() {
            debug!("Control handler already stopped");
        }
        match tokio::time::timeout(Duration::from_secs(2), control_handle).await {
            Ok(Ok(())) => debug!("Control handler stopped"),
            Ok(Err(e)) => warn!(error = ?e, "Control handler task panicked"),
            Err(_) => debug!("Control handler did not stop within timeout"),
        }

        service_result.map_err(|e| AppError::TaskFailed {
            reason: format!("Listening service task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!("Guardian Voice stopped");
        Ok(())
    }

    #[track_caller]
    fn collaborators(&self, engine: Box<dyn RecognitionEngine>) -> AppResult<Collaborators> {
        let runtime = Handle::try_current().map_err(|e| AppError::TaskFailed {
            reason: format!("No tokio runtime for background delivery: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let settings = Arc::new(TomlSettingsFile::new(&self.config.settings.path));
        let location: Arc<dyn LocationProvider> =
            Arc::new(SettingsLocation::new(Arc::clone(&settings)));
        let tracker = LiveTracker::from_config(&self.config.live_track, Arc::clone(&location))?;

        Ok(Collaborators {
            engine,
            playback: Arc::new(SettingsPlaybackMonitor::new(Arc::clone(&settings))),
            location,
            settings,
            dispatcher: Arc::new(WebhookDispatcher::new(
                &self.config.dispatch,
                tracker,
                runtime.clone(),
            )?),
            notifier: Arc::new(DesktopNotifier::new(
                self.config.dispatch.desktop_notifications,
                runtime,
            )),
            clock: Arc::new(LocalClock),
        })
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = ?e, "Failed to listen for Ctrl-C, use `quit` to exit");
        std::future::pending::<()>().await;
    }
}
