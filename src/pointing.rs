//! How far a hand-held device has to turn to point at a satellite.

use crate::coords::{normalize_degrees, normalize_longitude, TopocentricResult};

/// Offsets in degrees between where a device looks and where the satellite is.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointingError {
    /// Satellite azimuth minus device heading, in [-180, 180). Positive means
    /// turn clockwise.
    pub azimuth: f64,
    /// Device elevation minus satellite elevation. Positive means the device
    /// points too high.
    pub elevation: f64,
}

impl PointingError {
    /// Within `tolerance` degrees on both axes.
    pub fn is_on_target(&self, tolerance: f64) -> bool {
        self.azimuth.abs() <= tolerance && self.elevation.abs() <= tolerance
    }
}

/// Device elevation from its pitch. Pitch is positive when the top of the
/// device tilts down.
pub fn device_elevation(pitch: f64) -> f64 {
    -pitch
}

/// Pointing offsets for a device with compass `heading` and `pitch` (degrees).
pub fn pointing_error(look: &TopocentricResult, heading: f64, pitch: f64) -> PointingError {
    PointingError {
        azimuth: normalize_longitude(look.azimuth - normalize_degrees(heading)),
        elevation: device_elevation(pitch) - look.elevation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look(azimuth: f64, elevation: f64) -> TopocentricResult {
        TopocentricResult {
            azimuth,
            elevation,
            range: 1_000_000.0,
            radial_velocity: 0.0,
        }
    }

    #[test]
    fn on_target() {
        let e = pointing_error(&look(120.0, 35.0), 120.0, -35.0);
        assert_approx_eq!(e.azimuth, 0.0);
        assert_approx_eq!(e.elevation, 0.0);
        assert!(e.is_on_target(0.5));
    }

    #[test]
    fn azimuth_takes_the_short_way_round() {
        assert_approx_eq!(pointing_error(&look(10.0, 0.0), 350.0, 0.0).azimuth, 20.0);
        assert_approx_eq!(pointing_error(&look(350.0, 0.0), 10.0, 0.0).azimuth, -20.0);
        assert_approx_eq!(pointing_error(&look(180.0, 0.0), 0.0, 0.0).azimuth, -180.0);
        // headings outside [0, 360) from a compass are fine too
        assert_approx_eq!(pointing_error(&look(90.0, 0.0), -270.0, 0.0).azimuth, 0.0);
    }

    #[test]
    fn elevation_sign() {
        // device held level, satellite 40 degrees up: aim is 40 degrees low
        let e = pointing_error(&look(0.0, 40.0), 0.0, 0.0);
        assert_approx_eq!(e.elevation, -40.0);
        assert!(!e.is_on_target(5.0));
        // tilted 50 degrees up
        assert_approx_eq!(pointing_error(&look(0.0, 40.0), 0.0, -50.0).elevation, 10.0);
    }
}
