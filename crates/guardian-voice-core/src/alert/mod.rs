//! SOS alert payload and the collaborators that deliver it.

mod message;

pub use message::{build_alert_text, map_url};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude, -90..=90.
    pub latitude: f64,
    /// Longitude, -180..=180.
    pub longitude: f64,
}

impl Coordinates {
    /// Validated coordinates; `None` when out of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// What gets broadcast when the wake phrase is confirmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Who is asking for help.
    pub contact_name: String,
    /// Human-readable alert text.
    pub message: String,
    /// Where the user was, if known.
    pub coordinates: Option<Coordinates>,
}

/// Sends alerts to the user's contacts.
///
/// Fire-and-forget: implementations must return immediately and own any
/// network work themselves. Delivery failures are theirs to log.
pub trait AlertDispatcher: Send + Sync {
    /// Broadcast `alert` on every configured channel.
    fn dispatch(&self, alert: Alert);

    /// Stop follow-up work started by earlier alerts, such as live location
    /// sharing. Called when the service is stopped or shut down.
    fn cancel_follow_up(&self) {}
}

/// Supplies the device's last known position.
pub trait LocationProvider: Send + Sync {
    /// Last known coordinates, if any.
    fn last_known(&self) -> Option<Coordinates>;
}

/// No location available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationProvider for NoLocation {
    fn last_known(&self) -> Option<Coordinates> {
        None
    }
}
