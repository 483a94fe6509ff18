/** Table of constant values **/
pub const TOTHRD: f64 = 2.0 / 3.0; /* 2/3 */
pub const XKE: f64 = 7.43669161E-2; /* sqrt(GM) in earth radii^1.5 per minute */
pub const XKMPER: f64 = 6.378135E3; /* Earth equatorial radius km (WGS-72) */

/// Iterations spent on Kepler's equation. Enough for e << 1; the error
/// grows with eccentricity.
pub const KEPLER_ITERATIONS: usize = 5;
