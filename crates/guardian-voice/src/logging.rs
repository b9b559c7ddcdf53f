//! Console and optional rolling-file logging.

use crate::{AppError, AppResult, config::LoggingConfig};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::Subscriber;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "guardian_voice=debug,guardian_voice_core=debug";

const LOG_FILE_PREFIX: &str = "guardian-voice";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Console-only subscriber for the time before the config is loaded.
pub fn bootstrap_subscriber() -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(env_filter()).finish()
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file on drop and must live until exit.
#[track_caller]
pub fn init(config: &LoggingConfig) -> AppResult<Option<WorkerGuard>> {
    let (file_layer, guard) = match file_layer(config)? {
        Some((layer, guard)) => (Some(layer), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter())
        .try_init()
        .map_err(|e| AppError::LoggingError {
            reason: format!("Failed to install subscriber: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(guard)
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

#[track_caller]
fn file_layer(config: &LoggingConfig) -> AppResult<Option<(BoxedLayer, WorkerGuard)>> {
    if !config.file_logging {
        return Ok(None);
    }

    let Some(directory) = &config.directory else {
        return Err(AppError::LoggingError {
            reason: "File logging enabled without a log directory".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(directory)
        .map_err(|e| AppError::LoggingError {
            reason: format!("Failed to open log file in {:?}: {}", directory, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    };

    Ok(Some((layer, guard)))
}
