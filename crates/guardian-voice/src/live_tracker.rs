//! Live location sharing after an alert.
//!
//! An alert with coordinates opens a session on the live-track backend
//! (`POST {base}/api/live-track/start`). The backend answers with a session
//! id and a public tracking link; the link goes out with the alert and the
//! latest coordinates are posted to `{base}/api/live-track/update` on a fixed
//! interval until the session times out or is cancelled.

use crate::{AppError, AppResult, config::LiveTrackConfig};

use guardian_voice_core::{Alert, Coordinates, LocationProvider};

use std::{
    panic::Location,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use error_location::ErrorLocation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::{
    sync::watch,
    time::{Instant, MissedTickBehavior, interval_at, sleep_until},
};
use tracing::{debug, info, instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const ORIGIN: &str = "guardian_voice";

/// Body of the session start request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartRequest {
    /// Who is asking for help.
    #[serde(rename = "nome")]
    pub name: String,
    /// Alert text.
    pub text: String,
    /// Latitude at the time of the alert.
    pub lat: f64,
    /// Longitude at the time of the alert.
    pub lon: f64,
    /// Which client opened the session.
    #[serde(rename = "origem")]
    pub origin: String,
}

impl StartRequest {
    /// Start request for `alert` at `coordinates`.
    pub fn new(alert: &Alert, coordinates: Coordinates) -> Self {
        Self {
            name: alert.contact_name.clone(),
            text: alert.message.clone(),
            lat: coordinates.latitude,
            lon: coordinates.longitude,
            origin: ORIGIN.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct StartResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    tracking_url: Option<String>,
}

/// Body of a location update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRequest {
    /// Session the update belongs to.
    pub session_id: String,
    /// Current latitude.
    pub lat: f64,
    /// Current longitude.
    pub lon: f64,
}

/// A session the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSession {
    /// Backend session id, sent with every update.
    pub session_id: String,
    /// Public link contacts can follow, if the backend returned one.
    pub tracking_url: Option<String>,
}

/// Opens tracking sessions and keeps at most one update loop running.
pub struct LiveTracker {
    client: Client,
    base_url: String,
    interval: Duration,
    max_duration: Duration,
    location: Arc<dyn LocationProvider>,
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
}

impl LiveTracker {
    /// Tracker for `config`, or `None` when no backend is configured.
    #[track_caller]
    pub fn from_config(
        config: &LiveTrackConfig,
        location: Arc<dyn LocationProvider>,
    ) -> AppResult<Option<Self>> {
        let Some(base_url) = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            debug!("Live tracking disabled: no backend configured");
            return Ok(None);
        };

        Self::new(
            base_url,
            Duration::from_secs(config.interval_secs.max(1)),
            Duration::from_secs(config.max_duration_secs),
            location,
        )
        .map(Some)
    }

    /// Tracker posting to `base_url` every `interval` for at most `max_duration`.
    #[track_caller]
    pub fn new(
        base_url: &str,
        interval: Duration,
        max_duration: Duration,
        location: Arc<dyn LocationProvider>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::DispatchFailed {
                reason: format!("Failed to build live-track HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            interval,
            max_duration,
            location,
            stop_tx: Mutex::new(None),
        })
    }

    fn stop_slot(&self) -> MutexGuard<'_, Option<watch::Sender<bool>>> {
        self.stop_tx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the update loop for a new alert. Any loop still running for an
    /// earlier alert stops; the returned receiver fires when this one must.
    pub fn arm(&self) -> watch::Receiver<bool> {
        let (tx, rx) = watch::channel(false);
        let previous = self.stop_slot().replace(tx);
        if let Some(previous) = previous {
            if previous.send(true).is_ok() {
                debug!("Previous live-tracking loop superseded");
            }
        }
        rx
    }

    /// Stop the running update loop, if any.
    pub fn cancel(&self) {
        let running = self.stop_slot().take();
        if let Some(tx) = running {
            if tx.send(true).is_ok() {
                info!("Live tracking cancelled");
            }
        }
    }

    /// Ask the backend for a new tracking session.
    #[instrument(skip(self, request))]
    pub async fn open(&self, request: &StartRequest) -> AppResult<TrackingSession> {
        let url = format!("{}/api/live-track/start", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::DispatchFailed {
                reason: format!("Live-track start failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DispatchFailed {
                reason: format!("Live-track start answered {}", status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: StartResponse = response.json().await.map_err(|e| AppError::DispatchFailed {
            reason: format!("Live-track start returned an unreadable body: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let session_id = body.session_id.trim();
        if !body.ok || session_id.is_empty() {
            return Err(AppError::DispatchFailed {
                reason: "Live-track backend did not open a session".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(TrackingSession {
            session_id: session_id.to_string(),
            tracking_url: body
                .tracking_url
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
        })
    }

    /// Post one location update.
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub async fn update(&self, request: &UpdateRequest) -> AppResult<()> {
        let url = format!("{}/api/live-track/update", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::DispatchFailed {
                reason: format!("Live-track update failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DispatchFailed {
                reason: format!("Live-track update answered {}", status),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    /// Send the latest location every interval until `max_duration` has
    /// passed or `stop_rx` fires. Returns the number of updates sent.
    #[instrument(skip(self, session, stop_rx), fields(session_id = %session.session_id))]
    pub async fn follow(
        &self,
        session: &TrackingSession,
        mut stop_rx: watch::Receiver<bool>,
    ) -> usize {
        let started = Instant::now();
        let deadline = started + self.max_duration;
        let mut ticker = interval_at(started + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sent = 0;

        info!(
            interval_secs = self.interval.as_secs(),
            max_duration_secs = self.max_duration.as_secs(),
            "Live tracking started"
        );

        loop {
            tokio::select! {
                biased;

                _ = stop_rx.changed() => {
                    debug!(sent, "Live-tracking loop stopped");
                    return sent;
                }
                _ = sleep_until(deadline) => {
                    info!(sent, "Live tracking reached its maximum duration");
                    return sent;
                }
                _ = ticker.tick() => {}
            }

            let Some(coordinates) = self.location.last_known() else {
                debug!("No location for live-track update");
                continue;
            };

            let request = UpdateRequest {
                session_id: session.session_id.clone(),
                lat: coordinates.latitude,
                lon: coordinates.longitude,
            };
            match self.update(&request).await {
                Ok(()) => sent += 1,
                Err(e) => warn!(error = ?e, "Live-track update failed"),
            }
        }
    }
}
