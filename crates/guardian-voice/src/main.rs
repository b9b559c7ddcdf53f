//! Guardian Voice: always-on wake-phrase listener that raises an SOS alert.

mod app;
mod config;
mod control_command;
mod control_handler;
mod desktop_notifier;
mod error;
mod live_tracker;
mod logging;
mod settings_file;
mod webhook_dispatcher;

pub(crate) use {
    app::App,
    control_command::ControlCommand,
    control_handler::ControlHandler,
    desktop_notifier::DesktopNotifier,
    error::{AppError, Result as AppResult},
    live_tracker::LiveTracker,
    settings_file::{SettingsLocation, SettingsPlaybackMonitor, TomlSettingsFile},
    webhook_dispatcher::WebhookDispatcher,
};

use crate::config::Config;

use tracing::error;

/// Application entry point.
fn main() {
    let config = match tracing::subscriber::with_default(
        logging::bootstrap_subscriber(),
        Config::load,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
                error!("Failed to load config: {:?}", e);
            });
            std::process::exit(1);
        }
    };

    // Dropping the guard flushes the log file, so it lives until exit.
    let log_guard = match logging::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            tracing::subscriber::with_default(logging::bootstrap_subscriber(), || {
                error!("Failed to initialize logging: {:?}", e);
            });
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(App { config }.run());
    drop(runtime);

    if let Err(e) = result {
        error!(error = ?e, "Guardian Voice stopped with an error");
        drop(log_guard);
        std::process::exit(1);
    }
}
