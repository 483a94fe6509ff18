use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::coords::azel::{self, RADIAL_VELOCITY_INTERVAL_SECONDS};
use crate::coords::{EarthCenteredInertial, GeodeticPosition, ObserverState, TopocentricResult};
use crate::error::Result;
use crate::propagator::{KeplerPropagator, Propagator};
use crate::tle::OrbitalElements;

/// A satellite: its element set, its epoch as an instant, and the
/// propagator that moves it.
#[derive(Debug, Clone)]
pub struct Satellite<P = KeplerPropagator> {
    pub name: Option<String>,
    elements: OrbitalElements,
    epoch: DateTime<Utc>,
    propagator: P,
}

impl Satellite<KeplerPropagator> {
    /// Parses a TLE pair and pairs it with the default propagator.
    pub fn from_tle(line1: &str, line2: &str) -> Result<Self> {
        Self::from_elements(OrbitalElements::parse(line1, line2)?, KeplerPropagator::default())
    }
}

impl<P: Propagator> Satellite<P> {
    pub fn from_elements(elements: OrbitalElements, propagator: P) -> Result<Self> {
        let epoch = elements.epoch()?;
        Ok(Satellite {
            name: None,
            elements,
            epoch,
            propagator,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    pub fn period_minutes(&self) -> f64 {
        self.elements.period_minutes()
    }

    /// Minutes from the element set's epoch to `date`.
    pub fn minutes_since_epoch(&self, date: DateTime<Utc>) -> f64 {
        crate::time::minutes_between(self.epoch, date)
    }

    pub fn position_at(&self, date: DateTime<Utc>) -> EarthCenteredInertial {
        self.propagator
            .propagate(&self.elements, self.minutes_since_epoch(date))
    }

    pub fn geodetic_at(&self, date: DateTime<Utc>) -> GeodeticPosition {
        self.position_at(date).to_geodetic(date)
    }

    /// Look angles from `observer` at the observer's timestamp, including
    /// the radial velocity over the next ten seconds.
    pub fn look(&self, observer: &ObserverState) -> TopocentricResult {
        let now = observer.timestamp;
        let later = now
            + chrono::Duration::milliseconds((RADIAL_VELOCITY_INTERVAL_SECONDS * 1000.0) as i64);
        let result = azel::look_moving(
            observer,
            &self.geodetic_at(now),
            &self.geodetic_at(later),
            RADIAL_VELOCITY_INTERVAL_SECONDS,
        );
        debug!(
            "#{} az {:.2} el {:.2} range {:.0} m rv {:+.1} m/s",
            self.elements.sat_num,
            result.azimuth,
            result.elevation,
            result.range,
            result.radial_velocity
        );
        result
    }

    /// Elevation in degrees at `date`; the quantity the pass search samples.
    pub fn elevation_at(&self, observer: &ObserverState, date: DateTime<Utc>) -> f64 {
        azel::elevation_and_range(&observer.at(date), &self.geodetic_at(date)).0
    }
}

impl<P: Propagator> std::fmt::Display for Satellite<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(n) => write!(f, "{} #{}", n, self.elements.sat_num),
            None => write!(f, "#{}", self.elements.sat_num),
        }
    }
}

/// Parses a catalog of three-line records (name, line 1, line 2).
///
/// Records that do not look like a TLE triple, or fail to parse, are
/// skipped.
pub fn parse_catalog(text: &str) -> Vec<Satellite> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut satellites = Vec::new();
    let mut i = 0;
    while i + 2 < lines.len() {
        let (name, line1, line2) = (lines[i], lines[i + 1], lines[i + 2]);
        if !(line1.starts_with("1 ") && line2.starts_with("2 ")) {
            i += 1;
            continue;
        }
        match Satellite::from_tle(line1, line2) {
            Ok(sat) => satellites.push(sat.with_name(name)),
            Err(e) => warn!("skipping catalog entry '{}': {}", name, e),
        }
        i += 3;
    }
    debug!("catalog: {} satellites", satellites.len());
    satellites
}
