use chrono::{DateTime, Utc};

use super::eci::{ECEFVector, EarthCenteredFixed};
use super::latlong::{lla_to_ecef, local_up};

/// Where and when the observer is. Supplied by the caller and only read.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverState {
    /// WGS-84 degrees, positive north.
    pub latitude: f64,
    /// WGS-84 degrees, positive east.
    pub longitude: f64,
    /// Meters above the ellipsoid.
    pub altitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl ObserverState {
    pub fn new(latitude: f64, longitude: f64, altitude: f64, timestamp: DateTime<Utc>) -> Self {
        ObserverState {
            latitude,
            longitude,
            altitude,
            timestamp,
        }
    }

    /// Same place, different time.
    pub fn at(&self, timestamp: DateTime<Utc>) -> Self {
        ObserverState { timestamp, ..*self }
    }

    pub fn to_ecef(&self) -> EarthCenteredFixed {
        lla_to_ecef(
            self.latitude.to_radians(),
            self.longitude.to_radians(),
            self.altitude,
        )
    }

    /// Unit vector along the local vertical.
    pub fn up(&self) -> ECEFVector {
        local_up(self.latitude.to_radians(), self.longitude.to_radians())
    }
}
