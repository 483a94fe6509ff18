use super::latlong::{GeodeticPosition, EARTH_MEAN_RADIUS};
use super::normalize_degrees;
use super::observer::ObserverState;

/// Sampling interval used for the radial-velocity finite difference.
pub const RADIAL_VELOCITY_INTERVAL_SECONDS: f64 = 10.0;

/// Look angles from an observer to a satellite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopocentricResult {
    /// Degrees clockwise from true north, [0, 360).
    pub azimuth: f64,
    /// Degrees above the horizon, [-90, 90].
    pub elevation: f64,
    /// Slant range, meters.
    pub range: f64,
    /// Meters per second, positive when the satellite is receding.
    pub radial_velocity: f64,
}

impl TopocentricResult {
    /// Above the horizon. Zero elevation counts as set.
    pub fn is_visible(&self) -> bool {
        self.elevation > 0.0
    }
}

/// Look angles to a satellite at a single instant. Radial velocity is zero;
/// use [`look_moving`] when a later sample is available.
pub fn look(observer: &ObserverState, sat: &GeodeticPosition) -> TopocentricResult {
    let (elevation, range) = elevation_and_range(observer, sat);
    TopocentricResult {
        azimuth: azimuth(
            observer.latitude,
            observer.longitude,
            sat.latitude,
            sat.longitude,
        ),
        elevation,
        range,
        radial_velocity: 0.0,
    }
}

/// Look angles at `now`, with the radial velocity estimated from the range
/// change between `now` and `later`, `dt_seconds` apart.
pub fn look_moving(
    observer: &ObserverState,
    now: &GeodeticPosition,
    later: &GeodeticPosition,
    dt_seconds: f64,
) -> TopocentricResult {
    let mut result = look(observer, now);
    if dt_seconds != 0.0 {
        let later_range = slant_range(observer, later);
        result.radial_velocity = (later_range - result.range) / dt_seconds;
    }
    result
}

/// Initial great-circle bearing from the observer's ground point to the
/// sub-satellite point, degrees in [0, 360).
pub fn azimuth(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let y = delta_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Elevation in degrees and slant range in meters, both on the WGS-84
/// ellipsoid with the geodetic normal as "up".
pub fn elevation_and_range(observer: &ObserverState, sat: &GeodeticPosition) -> (f64, f64) {
    let los = sat.to_ecef() - observer.to_ecef();
    let range = los.norm();
    if range == 0.0 {
        return (90.0, 0.0);
    }
    let dot = (los.dot(&observer.up()) / range).clamp(-1.0, 1.0);
    (dot.asin().to_degrees(), range)
}

/// Slant range in meters.
pub fn slant_range(observer: &ObserverState, sat: &GeodeticPosition) -> f64 {
    (sat.to_ecef() - observer.to_ecef()).norm()
}

/// Haversine distance in km between two ground points on a sphere of the
/// mean Earth radius.
pub fn ground_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS * a.sqrt().atan2((1.0 - a).sqrt())
}
