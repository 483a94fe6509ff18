//! Satellite look angles from two-line element sets.
//!
//! The pipeline is `tle` → `propagator` → `coords::latlong` → `coords::azel`,
//! with `pass` driving the last three repeatedly to find the next rise or set.
//! Nothing here reads the system clock: every call takes the time it applies to.

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod coords;
pub mod error;
pub mod pass;
pub mod pointing;
pub mod propagator;
pub mod sat;
pub mod time;
pub mod tle;

pub use coords::{EarthCenteredInertial, GeodeticPosition, ObserverState, TopocentricResult};
pub use error::{Error, Result};
pub use pass::{CancelToken, PassEvent, PassKind, PassSearch, SearchOutcome};
pub use propagator::{KeplerPropagator, KeplerSolver, Propagator};
pub use sat::Satellite;
pub use tle::OrbitalElements;
