use chrono::{DateTime, Utc};

/// Earth-centered inertial position in kilometers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EarthCenteredInertial {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EarthCenteredInertial {
    pub fn new(pos: (f64, f64, f64)) -> EarthCenteredInertial {
        EarthCenteredInertial {
            x: pos.0,
            y: pos.1,
            z: pos.2,
        }
    }

    /// Distance from the Earth's center, km.
    pub fn radius(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Geodetic position of this point at `now`.
    pub fn to_geodetic(self, now: DateTime<Utc>) -> super::latlong::GeodeticPosition {
        super::latlong::GeodeticPosition::from_eci(self, now)
    }

    /// As [`to_geodetic`](Self::to_geodetic) with a chosen number of latitude
    /// correction passes.
    pub fn to_geodetic_with(
        self,
        now: DateTime<Utc>,
        iterations: usize,
    ) -> super::latlong::GeodeticPosition {
        super::latlong::GeodeticPosition::from_eci_with(self, now, iterations)
    }
}

/// Earth-centered, Earth-fixed position in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EarthCenteredFixed {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Difference of two ECEF positions, meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ECEFVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ECEFVector {
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &ECEFVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }
}

impl std::ops::Sub for EarthCenteredFixed {
    type Output = ECEFVector;
    fn sub(self, other: EarthCenteredFixed) -> ECEFVector {
        ECEFVector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}
