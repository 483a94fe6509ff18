use chrono::{DateTime, Utc};

use super::eci::{ECEFVector, EarthCenteredFixed, EarthCenteredInertial};
use super::normalize_longitude;

/// WGS-84 equatorial radius, km.
pub const WGS84_A: f64 = 6378.137;
/// WGS-84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257223563;
/// Mean Earth radius, km.
pub const EARTH_MEAN_RADIUS: f64 = 6371.0;

/// Fixed number of passes of the ellipsoidal latitude correction.
pub const LATITUDE_ITERATIONS: usize = 5;

fn wgs84_e2() -> f64 {
    2.0 * WGS84_F - WGS84_F * WGS84_F
}

/// Geodetic position on the WGS-84 ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeodeticPosition {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees in [-180, 180), positive east.
    pub longitude: f64,
    /// Kilometers above the ellipsoid.
    pub altitude: f64,
}

impl GeodeticPosition {
    /// Rotates an inertial position into Earth-fixed geodetic coordinates,
    /// using GMST at `now` as the only rotation (no precession, nutation or
    /// polar motion).
    pub fn from_eci(eci: EarthCenteredInertial, now: DateTime<Utc>) -> GeodeticPosition {
        Self::from_eci_with(eci, now, LATITUDE_ITERATIONS)
    }

    pub fn from_eci_with(
        eci: EarthCenteredInertial,
        now: DateTime<Utc>,
        iterations: usize,
    ) -> GeodeticPosition {
        let e2 = wgs84_e2();
        let EarthCenteredInertial { x, y, z } = eci;

        let lon = y.atan2(x) - crate::time::gmst(now);
        let r = x.hypot(y);

        let mut lat = z.atan2(r);
        for _ in 0..iterations {
            let sin_lat = lat.sin();
            let c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
            let h = height(r, z, lat, c);
            lat = z.atan2(r * (1.0 - e2 * c / (c + h / WGS84_A)));
        }
        let sin_lat = lat.sin();
        let c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();

        GeodeticPosition {
            latitude: lat.to_degrees(),
            longitude: normalize_longitude(lon.to_degrees()),
            altitude: height(r, z, lat, c),
        }
    }

    /// Earth-fixed Cartesian position in meters.
    pub fn to_ecef(&self) -> EarthCenteredFixed {
        lla_to_ecef(
            self.latitude.to_radians(),
            self.longitude.to_radians(),
            self.altitude * 1000.0,
        )
    }

    /// Radius in km of the ground circle from which a satellite at this
    /// altitude is above the horizon (straight-line distance to the horizon).
    pub fn footprint_radius_km(&self) -> f64 {
        let h = self.altitude.max(0.0);
        (h * h + 2.0 * EARTH_MEAN_RADIUS * h).sqrt()
    }
}

/// Height above the ellipsoid along the normal at `lat`, valid at the poles.
fn height(r: f64, z: f64, lat: f64, c: f64) -> f64 {
    let (sin_lat, cos_lat) = lat.sin_cos();
    r * cos_lat + z * sin_lat - WGS84_A / c
}

/// Geodetic (radians, radians, meters) to WGS-84 ECEF meters.
pub fn lla_to_ecef(lat: f64, lon: f64, alt_m: f64) -> EarthCenteredFixed {
    let e2 = wgs84_e2();
    let a = WGS84_A * 1000.0;
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    EarthCenteredFixed {
        x: (n + alt_m) * cos_lat * cos_lon,
        y: (n + alt_m) * cos_lat * sin_lon,
        z: (n * (1.0 - e2) + alt_m) * sin_lat,
    }
}

/// Unit ellipsoid normal ("up") at a geodetic latitude/longitude in radians.
pub fn local_up(lat: f64, lon: f64) -> ECEFVector {
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    ECEFVector {
        x: cos_lat * cos_lon,
        y: cos_lat * sin_lon,
        z: sin_lat,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn j2000() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn equatorial_point() {
        // GMST at J2000 is 280.46061837 deg, so inertial +x lies at 79.539 deg east
        let p = EarthCenteredInertial::new((7000.0, 0.0, 0.0)).to_geodetic(j2000());
        assert_approx_eq!(p.latitude, 0.0);
        assert_approx_eq!(p.longitude, 79.53938163, 1e-6);
        assert_approx_eq!(p.altitude, 7000.0 - WGS84_A);
    }

    #[test]
    fn pole() {
        let p = EarthCenteredInertial::new((0.0, 0.0, 7000.0)).to_geodetic(j2000());
        assert_approx_eq!(p.latitude, 90.0);
        let b = WGS84_A * (1.0 - WGS84_F);
        assert_approx_eq!(p.altitude, 7000.0 - b, 1e-6);
    }

    #[test]
    fn ecef_round_trip() {
        let now = j2000();
        let start = GeodeticPosition {
            latitude: 47.3769,
            longitude: 8.5417,
            altitude: 420.0,
        };
        let ecef = start.to_ecef();
        // undo the Earth rotation to get back to an inertial vector
        let theta = crate::time::gmst(now);
        let (s, c) = theta.sin_cos();
        let eci = EarthCenteredInertial::new((
            (ecef.x * c - ecef.y * s) / 1000.0,
            (ecef.x * s + ecef.y * c) / 1000.0,
            ecef.z / 1000.0,
        ));
        let back = eci.to_geodetic(now);
        assert_approx_eq!(back.latitude, start.latitude, 1e-6);
        assert_approx_eq!(back.longitude, start.longitude, 1e-9);
        assert_approx_eq!(back.altitude, start.altitude, 1e-5);
    }

    #[test]
    fn latitude_iterations_converge() {
        let eci = EarthCenteredInertial::new((4000.0, 2000.0, 5000.0));
        let five = eci.to_geodetic(j2000());
        let many = eci.to_geodetic_with(j2000(), 50);
        let none = eci.to_geodetic_with(j2000(), 0);
        assert_approx_eq!(five.latitude, many.latitude, 1e-9);
        // geocentric latitude is below geodetic latitude in the north
        assert!(none.latitude < many.latitude);
        assert_eq!(none.longitude, many.longitude);
    }

    #[test]
    fn longitude_range() {
        let now = j2000();
        for k in 0..72 {
            let a = (k as f64 * 5.0).to_radians();
            let p = EarthCenteredInertial::new((7000.0 * a.cos(), 7000.0 * a.sin(), 100.0))
                .to_geodetic(now);
            assert!(p.longitude >= -180.0 && p.longitude < 180.0);
        }
    }

    #[test]
    fn footprint() {
        let p = GeodeticPosition {
            latitude: 0.0,
            longitude: 0.0,
            altitude: 400.0,
        };
        assert_approx_eq!(p.footprint_radius_km(), (400.0f64 * 400.0 + 2.0 * 6371.0 * 400.0).sqrt());
        let ground = GeodeticPosition { altitude: -1.0, ..p };
        assert_approx_eq!(ground.footprint_radius_km(), 0.0);
    }

    #[test]
    fn ecef_on_equator() {
        let e = lla_to_ecef(0.0, 0.0, 0.0);
        assert_approx_eq!(e.x, 6_378_137.0);
        assert_approx_eq!(e.y, 0.0);
        assert_approx_eq!(e.z, 0.0);
    }
}
