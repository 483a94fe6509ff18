/// Solves `M = E - e sin E` by the fixed-point recurrence `E = M + e sin E`,
/// seeded with `E = M`.
pub fn kepler_fixed_point(mean_anomaly: f64, ecc: f64, iterations: usize) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..iterations {
        ea = mean_anomaly + ecc * ea.sin();
    }
    ea
}

/// Newton-Raphson on `f(E) = E - e sin E - M`, seeded with `E = M`.
pub fn kepler_newton(mean_anomaly: f64, ecc: f64, iterations: usize) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..iterations {
        let (sin_e, cos_e) = ea.sin_cos();
        // 1 - e cos E >= 1 - e > 0
        ea -= (ea - ecc * sin_e - mean_anomaly) / (1.0 - ecc * cos_e);
    }
    ea
}

/// True anomaly and radius (in units of `a`) from the eccentric anomaly.
pub fn true_anomaly_and_radius(ea: f64, ecc: f64, a: f64) -> (f64, f64) {
    let (sin_e, cos_e) = ea.sin_cos();
    let v = ((1.0 - ecc * ecc).sqrt() * sin_e).atan2(cos_e - ecc);
    let r = a * (1.0 - ecc * cos_e);
    (v, r)
}

/// Rotates a perifocal-plane point `(xp, yp, 0)` into the inertial frame.
/// Angles in radians.
pub fn perifocal_to_inertial(
    xp: f64,
    yp: f64,
    raan: f64,
    argp: f64,
    incl: f64,
) -> (f64, f64, f64) {
    let (sin_o, cos_o) = raan.sin_cos();
    let (sin_w, cos_w) = argp.sin_cos();
    let (sin_i, cos_i) = incl.sin_cos();

    let x = (cos_o * cos_w - sin_o * sin_w * cos_i) * xp
        + (-cos_o * sin_w - sin_o * cos_w * cos_i) * yp;
    let y = (sin_o * cos_w + cos_o * sin_w * cos_i) * xp
        + (-sin_o * sin_w + cos_o * cos_w * cos_i) * yp;
    let z = (sin_w * sin_i) * xp + (cos_w * sin_i) * yp;
    (x, y, z)
}
