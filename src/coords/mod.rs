pub mod azel;
pub mod eci;
pub mod latlong;
pub mod observer;

pub use azel::{look, look_moving, TopocentricResult};
pub use eci::EarthCenteredInertial;
pub use latlong::GeodeticPosition;
pub use observer::ObserverState;

/// Reduces an angle in degrees to [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Reduces a longitude in degrees to [-180, 180).
pub fn normalize_longitude(deg: f64) -> f64 {
    normalize_degrees(deg + 180.0) - 180.0
}
