use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::error::{Error, Result};

/// Julian date of the J2000.0 reference epoch.
pub const J2000: f64 = 2451545.0;

/// GMST at J2000.0, degrees.
const GMST_AT_J2000: f64 = 280.46061837;
/// Sidereal rotation, degrees per day.
const GMST_RATE: f64 = 360.98564736629;

/// Two-digit TLE years below this belong to the 2000s.
pub const EPOCH_YEAR_PIVOT: i32 = 57;

/// Calculates the Julian date for a given point in time.
pub fn julian_date(date: DateTime<Utc>) -> f64 {
    let year = julian_date_of_year(date.year());
    let doy = julian_day_of_year(date.year(), date.month(), date.day());
    let f_day =
        julian_fraction_of_day(date.hour(), date.minute(), date.second(), date.nanosecond());
    year + doy as f64 + f_day
}

/// Julian date of day 0.0 of `year` (Meeus, Astronomical Formulae for Calculators).
pub fn julian_date_of_year(year: i32) -> f64 {
    let year = year - 1;
    let a = year.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * year as f64).floor() + (30.6001f64 * 14.0).floor() + 1720994.5 + b as f64
}

const DAYS: [u16; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn julian_day_of_year(yr: i32, mo: u32, dy: u32) -> u16 {
    let day: u16 = DAYS.iter().take(mo as usize - 1).sum();
    let mut day = day + dy as u16;

    if is_leap_year(yr) && mo > 2 {
        day += 1;
    }

    day
}

fn is_leap_year(yr: i32) -> bool {
    (yr % 4 == 0) && ((yr % 100 != 0) || (yr % 400 == 0))
}

pub fn julian_fraction_of_day(h: u32, m: u32, s: u32, ns: u32) -> f64 {
    (h as f64 / 24.0)
        + (m as f64 / (24.0 * 60.0))
        + (s as f64 / (24.0 * 3600.0))
        + (ns as f64 / (24.0 * 3600.0 * 1.0e+9))
}

/// Greenwich Mean Sidereal Time in degrees, normalized to [0, 360).
///
/// Linear in the days elapsed since J2000.0; no nutation term.
pub fn gmst_degrees(date: DateTime<Utc>) -> f64 {
    let d = julian_date(date) - J2000;
    (GMST_AT_J2000 + GMST_RATE * d).rem_euclid(360.0)
}

/// Greenwich Mean Sidereal Time in radians, normalized to [0, 2π).
pub fn gmst(date: DateTime<Utc>) -> f64 {
    gmst_degrees(date).to_radians()
}

/// Expands a two-digit TLE year around the 1957 pivot.
pub fn full_year(two_digit: i32) -> i32 {
    if two_digit < EPOCH_YEAR_PIVOT {
        2000 + two_digit
    } else {
        1900 + two_digit
    }
}

/// UTC instant of a TLE epoch given as a four-digit year and a fractional
/// day of year (day 1.0 is January 1st, 00:00).
pub fn epoch_to_datetime(year: i32, day_of_year: f64) -> Result<DateTime<Utc>> {
    let days_in_year = if is_leap_year(year) { 366.0 } else { 365.0 };
    if !day_of_year.is_finite() || day_of_year < 1.0 || day_of_year >= days_in_year + 1.0 {
        return Err(Error::InvalidEpoch(format!(
            "day of year {} out of range for {}",
            day_of_year, year
        )));
    }
    let jan1 = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| Error::InvalidEpoch(format!("year {} not representable", year)))?;
    let offset_ns = ((day_of_year - 1.0) * 86_400.0e9).round() as i64;
    Ok(jan1 + chrono::Duration::nanoseconds(offset_ns))
}

/// Signed minutes from `epoch` to `date`.
pub fn minutes_between(epoch: DateTime<Utc>, date: DateTime<Utc>) -> f64 {
    let delta = date - epoch;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 60.0e6,
        None => delta.num_milliseconds() as f64 / 60.0e3,
    }
}
