//! Two-body propagation of TLE mean elements for near-circular LEO orbits.
//!
//! No drag, no J2, no deep-space terms: the mean anomaly advances linearly
//! and the orbit plane stays fixed in inertial space.

mod math;
pub(crate) mod vals;

pub use math::{kepler_fixed_point, kepler_newton};
use math::*;
use vals::*;

use crate::coords::EarthCenteredInertial;
use crate::tle::OrbitalElements;

/// Produces an inertial position from a set of elements and a time offset.
///
/// Implementations must be pure: the same inputs give the same output and
/// no state is shared between calls, so one instance can serve any number
/// of threads.
pub trait Propagator {
    /// Position in km at `minutes_since_epoch` (may be negative).
    fn propagate(&self, elements: &OrbitalElements, minutes_since_epoch: f64)
        -> EarthCenteredInertial;
}

impl<P: Propagator + ?Sized> Propagator for &P {
    fn propagate(
        &self,
        elements: &OrbitalElements,
        minutes_since_epoch: f64,
    ) -> EarthCenteredInertial {
        (**self).propagate(elements, minutes_since_epoch)
    }
}

/// How the eccentric anomaly is solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeplerSolver {
    /// `E = M + e sin E`; the reference behaviour.
    #[default]
    FixedPoint,
    /// Newton-Raphson, same iteration budget.
    Newton,
}

/// Keplerian propagator for the simplified LEO model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KeplerPropagator {
    pub kepler_iterations: usize,
    pub solver: KeplerSolver,
}

impl Default for KeplerPropagator {
    fn default() -> Self {
        KeplerPropagator {
            kepler_iterations: KEPLER_ITERATIONS,
            solver: KeplerSolver::FixedPoint,
        }
    }
}

impl KeplerPropagator {
    pub fn new() -> KeplerPropagator {
        Self::default()
    }

    pub fn with_solver(solver: KeplerSolver) -> KeplerPropagator {
        KeplerPropagator {
            solver,
            ..Self::default()
        }
    }

    /// Semi-major axis in km, from Kepler's third law with the mean motion
    /// in radians per minute.
    pub fn semi_major_axis(elements: &OrbitalElements) -> f64 {
        XKMPER * (XKE / elements.mean_motion_rad_per_min()).powf(TOTHRD)
    }

    /// Mean anomaly in radians at `minutes_since_epoch`, reduced to [0, 2π).
    pub fn mean_anomaly(elements: &OrbitalElements, minutes_since_epoch: f64) -> f64 {
        let advance = (elements.mean_motion_rad_per_min() * minutes_since_epoch).to_degrees();
        (elements.mean_anomaly + advance).rem_euclid(360.0).to_radians()
    }

    pub fn eccentric_anomaly(&self, mean_anomaly: f64, ecc: f64) -> f64 {
        match self.solver {
            KeplerSolver::FixedPoint => {
                kepler_fixed_point(mean_anomaly, ecc, self.kepler_iterations)
            }
            KeplerSolver::Newton => kepler_newton(mean_anomaly, ecc, self.kepler_iterations),
        }
    }
}

impl Propagator for KeplerPropagator {
    fn propagate(
        &self,
        elements: &OrbitalElements,
        minutes_since_epoch: f64,
    ) -> EarthCenteredInertial {
        let a = Self::semi_major_axis(elements);
        let ecc = elements.eccentricity;
        let m = Self::mean_anomaly(elements, minutes_since_epoch);
        let ea = self.eccentric_anomaly(m, ecc);
        let (v, r) = true_anomaly_and_radius(ea, ecc, a);

        let (sin_v, cos_v) = v.sin_cos();
        let pos = perifocal_to_inertial(
            r * cos_v,
            r * sin_v,
            elements.raan.to_radians(),
            elements.arg_perigee.to_radians(),
            elements.inclination.to_radians(),
        );
        EarthCenteredInertial::new(pos)
    }
}
