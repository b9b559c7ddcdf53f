//! Delivers alerts as JSON POSTs to the configured webhooks, opening a
//! live-tracking session first when a tracker is configured.

use crate::{
    AppError, AppResult, LiveTracker,
    config::DispatchConfig,
    live_tracker::{StartRequest, TrackingSession},
};

use guardian_voice_core::{Alert, AlertDispatcher, map_url};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tokio::{runtime::Handle, sync::watch};
use tracing::{debug, error, info, instrument, warn};

/// Body posted to every webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookPayload {
    /// Alert text.
    pub message: String,
    /// Latitude, if known.
    pub latitude: Option<f64>,
    /// Longitude, if known.
    pub longitude: Option<f64>,
    /// Map link, if the location is known.
    pub map_url: Option<String>,
    /// Live-tracking link, if a session was opened.
    pub tracking_url: Option<String>,
}

impl WebhookPayload {
    /// Attach the live-tracking link.
    pub fn with_tracking_url(mut self, tracking_url: Option<String>) -> Self {
        self.tracking_url = tracking_url;
        self
    }
}

impl From<&Alert> for WebhookPayload {
    fn from(alert: &Alert) -> Self {
        Self {
            message: alert.message.clone(),
            latitude: alert.coordinates.map(|c| c.latitude),
            longitude: alert.coordinates.map(|c| c.longitude),
            map_url: alert.coordinates.map(map_url),
            tracking_url: None,
        }
    }
}

/// Live tracking requested for one alert.
struct TrackingRequest {
    tracker: Arc<LiveTracker>,
    stop_rx: watch::Receiver<bool>,
    start: StartRequest,
}

/// Fire-and-forget webhook delivery, one task per URL.
pub struct WebhookDispatcher {
    client: Client,
    webhooks: Arc<[String]>,
    tracker: Option<Arc<LiveTracker>>,
    runtime: Handle,
}

impl WebhookDispatcher {
    /// Dispatcher for `config`, spawning deliveries on `runtime`.
    #[track_caller]
    pub fn new(
        config: &DispatchConfig,
        tracker: Option<LiveTracker>,
        runtime: Handle,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| AppError::DispatchFailed {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        if config.webhooks.is_empty() {
            warn!("No webhooks configured, alerts will only be logged");
        }

        Ok(Self {
            client,
            webhooks: config.webhooks.clone().into(),
            tracker: tracker.map(Arc::new),
            runtime,
        })
    }

    /// POST `payload` to `url`, failing on transport errors and non-2xx replies.
    #[instrument(skip(client, payload))]
    pub async fn deliver(
        client: &Client,
        url: &str,
        payload: &WebhookPayload,
    ) -> AppResult<StatusCode> {
        let response = client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::DispatchFailed {
                reason: format!("Request to {} failed: {}", url, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DispatchFailed {
                reason: format!("Webhook {} answered {}", url, status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(status)
    }

    /// Spawn one delivery per webhook.
    fn deliver_all(client: &Client, webhooks: &[String], payload: WebhookPayload) {
        if webhooks.is_empty() {
            warn!(message = %payload.message, "Alert not delivered: no webhooks configured");
            return;
        }

        let payload = Arc::new(payload);
        for url in webhooks.iter().cloned() {
            let client = client.clone();
            let payload = Arc::clone(&payload);

            tokio::spawn(async move {
                match Self::deliver(&client, &url, &payload).await {
                    Ok(status) => info!(url = %url, %status, "Alert delivered"),
                    Err(e) => error!(url = %url, error = ?e, "Alert delivery failed"),
                }
            });
        }
    }

    /// Open a tracking session unless cancelled first. Failures only cost
    /// the tracking link; the alert still goes out.
    async fn open_session(request: &TrackingRequest) -> Option<TrackingSession> {
        let mut stop_rx = request.stop_rx.clone();
        tokio::select! {
            biased;

            _ = stop_rx.changed() => {
                debug!("Live tracking cancelled before the session opened");
                None
            }
            result = request.tracker.open(&request.start) => match result {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(error = ?e, "Live tracking unavailable for this alert");
                    None
                }
            },
        }
    }
}

impl AlertDispatcher for WebhookDispatcher {
    fn dispatch(&self, alert: Alert) {
        let tracking = match (&self.tracker, alert.coordinates) {
            (Some(tracker), Some(coordinates)) => Some(TrackingRequest {
                tracker: Arc::clone(tracker),
                stop_rx: tracker.arm(),
                start: StartRequest::new(&alert, coordinates),
            }),
            _ => None,
        };

        let client = self.client.clone();
        let webhooks = Arc::clone(&self.webhooks);

        self.runtime.spawn(async move {
            let session = match &tracking {
                Some(request) => Self::open_session(request).await,
                None => None,
            };

            let payload = WebhookPayload::from(&alert)
                .with_tracking_url(session.as_ref().and_then(|s| s.tracking_url.clone()));
            Self::deliver_all(&client, &webhooks, payload);

            if let (Some(request), Some(session)) = (tracking, session) {
                request.tracker.follow(&session, request.stop_rx).await;
            }
        });
    }

    fn cancel_follow_up(&self) {
        if let Some(tracker) = &self.tracker {
            tracker.cancel();
        }
    }
}
