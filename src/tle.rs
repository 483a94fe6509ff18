use std::ops::Range;

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Error, Result};

/// Minimum length of either TLE line; the checksum column is the 69th.
pub const TLE_LINE_LEN: usize = 69;

const MINUTES_PER_DAY: f64 = 1440.0;

// Line 1 columns (zero-based, end exclusive)
const L1_SATNUM: Range<usize> = 2..7;
const L1_EPOCH: Range<usize> = 18..32;
const L1_EPOCH_YEAR: Range<usize> = 18..20;
const L1_EPOCH_DAY: Range<usize> = 20..32;

// Line 2 columns
const L2_SATNUM: Range<usize> = 2..7;
const L2_INCLINATION: Range<usize> = 8..16;
const L2_RAAN: Range<usize> = 17..25;
const L2_ECCENTRICITY: Range<usize> = 26..33;
const L2_ARG_PERIGEE: Range<usize> = 34..42;
const L2_MEAN_ANOMALY: Range<usize> = 43..51;
const L2_MEAN_MOTION: Range<usize> = 52..63;

/// Mean orbital elements of one NORAD two-line element set.
///
/// Angles are in degrees, mean motion in revolutions per day. Built once by
/// [`OrbitalElements::parse`] and never mutated; one value serves any number
/// of propagation calls.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitalElements {
    pub sat_num: u32,
    /// Four-digit epoch year.
    pub epoch_year: i32,
    /// Fractional day of year, 1.0 = January 1st 00:00 UTC.
    pub epoch_day: f64,
    pub inclination: f64,
    pub raan: f64,
    pub eccentricity: f64,
    pub arg_perigee: f64,
    pub mean_anomaly: f64,
    pub mean_motion: f64,
}

impl OrbitalElements {
    /// Parses a TLE pair. Lines are read at their fixed columns; only
    /// trailing whitespace (line endings) is stripped.
    pub fn parse(line1: &str, line2: &str) -> Result<OrbitalElements> {
        let line1 = checked_line(line1, 1)?;
        let line2 = checked_line(line2, 2)?;

        let sat_num: u32 = field(line1, 1, L1_SATNUM, "satellite number")?;
        let sat_num2: u32 = field(line2, 2, L2_SATNUM, "satellite number")?;
        if sat_num != sat_num2 {
            return Err(Error::malformed(
                2,
                format!("satellite number {} does not match line 1 ({})", sat_num2, sat_num),
            ));
        }

        let year: i32 = field(line1, 1, L1_EPOCH_YEAR, "epoch year")?;
        let epoch_day: f64 = field(line1, 1, L1_EPOCH_DAY, "epoch day")?;

        let elements = OrbitalElements {
            sat_num,
            epoch_year: crate::time::full_year(year),
            epoch_day,
            inclination: field(line2, 2, L2_INCLINATION, "inclination")?,
            raan: field(line2, 2, L2_RAAN, "right ascension of ascending node")?,
            eccentricity: eccentricity(line2)?,
            arg_perigee: field(line2, 2, L2_ARG_PERIGEE, "argument of perigee")?,
            mean_anomaly: field(line2, 2, L2_MEAN_ANOMALY, "mean anomaly")?,
            mean_motion: field(line2, 2, L2_MEAN_MOTION, "mean motion")?,
        };
        elements.validate()?;

        debug!(
            "parsed element set #{} epoch {}/{:.8}, {:.8} rev/day",
            elements.sat_num, elements.epoch_year, elements.epoch_day, elements.mean_motion
        );
        Ok(elements)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(Error::malformed(
                2,
                format!("eccentricity {} outside [0, 1)", self.eccentricity),
            ));
        }
        if !self.mean_motion.is_finite() || self.mean_motion <= 0.0 {
            return Err(Error::malformed(
                2,
                format!("mean motion {} must be positive", self.mean_motion),
            ));
        }
        let angles = [
            ("inclination", self.inclination),
            ("right ascension of ascending node", self.raan),
            ("argument of perigee", self.arg_perigee),
            ("mean anomaly", self.mean_anomaly),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(Error::malformed(2, format!("{} is not finite", name)));
            }
        }
        if !self.epoch_day.is_finite() {
            return Err(Error::malformed(1, "epoch day is not finite"));
        }
        Ok(())
    }

    /// Epoch as a UTC instant.
    pub fn epoch(&self) -> Result<DateTime<Utc>> {
        crate::time::epoch_to_datetime(self.epoch_year, self.epoch_day)
    }

    /// Mean motion in radians per minute.
    pub fn mean_motion_rad_per_min(&self) -> f64 {
        self.mean_motion * std::f64::consts::TAU / MINUTES_PER_DAY
    }

    /// Orbital period in minutes.
    pub fn period_minutes(&self) -> f64 {
        MINUTES_PER_DAY / self.mean_motion
    }
}

/// Cheap pre-check a caller can run before handing lines to the parser.
pub fn is_valid_line(line: &str) -> bool {
    let line = line.trim_end();
    !line.trim_start().is_empty() && line.len() >= TLE_LINE_LEN
}

/// Extracts the epoch of line 1 as a UTC instant, independently of the
/// rest of the element set.
pub fn epoch_from_line1(line1: &str) -> Result<DateTime<Utc>> {
    let field = line1
        .get(L1_EPOCH)
        .ok_or_else(|| Error::InvalidEpoch("line 1 too short for epoch field".into()))?
        .trim();
    if field.len() < 3 || !field.is_char_boundary(2) {
        return Err(Error::InvalidEpoch(format!("'{}'", field)));
    }
    let (yy, day) = field.split_at(2);
    let yy: i32 = yy
        .parse()
        .map_err(|_| Error::InvalidEpoch(format!("year '{}' is not numeric", yy)))?;
    let day: f64 = day
        .parse()
        .map_err(|_| Error::InvalidEpoch(format!("day '{}' is not numeric", day)))?;
    crate::time::epoch_to_datetime(crate::time::full_year(yy), day)
}

fn checked_line(line: &str, number: u8) -> Result<&str> {
    let line = line.trim_end();
    if !line.is_ascii() {
        return Err(Error::malformed(number, "non-ASCII characters"));
    }
    if line.len() < TLE_LINE_LEN {
        return Err(Error::malformed(
            number,
            format!("{} characters, at least {} required", line.len(), TLE_LINE_LEN),
        ));
    }
    let expected = char::from(b'0' + number);
    if !line.starts_with(expected) || line.as_bytes()[1] != b' ' {
        return Err(Error::malformed(
            number,
            format!("line must start with '{} '", expected),
        ));
    }
    Ok(line)
}

fn field<T: std::str::FromStr>(line: &str, number: u8, cols: Range<usize>, name: &str) -> Result<T> {
    let raw = line[cols.clone()].trim();
    raw.parse().map_err(|_| {
        Error::malformed(
            number,
            format!(
                "{} '{}' (columns {}-{}) is not a number",
                name,
                raw,
                cols.start + 1,
                cols.end
            ),
        )
    })
}

/// Eccentricity is stored without its leading "0.".
fn eccentricity(line2: &str) -> Result<f64> {
    let raw = line2[L2_ECCENTRICITY].trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(
            2,
            format!("eccentricity '{}' is not a number", raw),
        ));
    }
    format!("0.{}", raw)
        .parse()
        .map_err(|_| Error::malformed(2, format!("eccentricity '{}' is not a number", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn parse_iss() {
        let el = OrbitalElements::parse(ISS_LINE1, ISS_LINE2).unwrap();
        assert_eq!(el.sat_num, 25544);
        assert_eq!(el.epoch_year, 2008);
        assert_approx_eq!(el.epoch_day, 264.51782528);
        assert_approx_eq!(el.inclination, 51.6416);
        assert_approx_eq!(el.raan, 247.4627);
        assert_approx_eq!(el.eccentricity, 0.0006703);
        assert_approx_eq!(el.arg_perigee, 130.5360);
        assert_approx_eq!(el.mean_anomaly, 325.0288);
        assert_approx_eq!(el.mean_motion, 15.72125391);
    }

    #[test]
    fn parse_tolerates_line_endings() {
        let l1 = format!("{}\r\n", ISS_LINE1);
        let l2 = format!("{}  \n", ISS_LINE2);
        assert!(OrbitalElements::parse(&l1, &l2).is_ok());
    }

    #[test]
    fn derived_quantities() {
        let el = OrbitalElements::parse(ISS_LINE1, ISS_LINE2).unwrap();
        assert_approx_eq!(el.period_minutes(), 91.5958, 1e-3);
        assert_approx_eq!(el.mean_motion_rad_per_min(), 0.0685969, 1e-6);
        let epoch = el.epoch().unwrap();
        assert_eq!(epoch, epoch_from_line1(ISS_LINE1).unwrap());
    }

    #[test]
    fn truncated_line_is_rejected() {
        let short = &ISS_LINE2[..60];
        match OrbitalElements::parse(ISS_LINE1, short) {
            Err(Error::MalformedElementSet { line: 2, .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
        let short = &ISS_LINE1[..68];
        assert!(matches!(
            OrbitalElements::parse(short, ISS_LINE2),
            Err(Error::MalformedElementSet { line: 1, .. })
        ));
    }

    #[test]
    fn non_numeric_inclination_is_rejected() {
        let bad = ISS_LINE2.replacen(" 51.6416", " 51.6x16", 1);
        assert_eq!(bad.len(), ISS_LINE2.len());
        let err = OrbitalElements::parse(ISS_LINE1, &bad).unwrap_err();
        match err {
            Error::MalformedElementSet { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("inclination"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn swapped_lines_are_rejected() {
        assert!(OrbitalElements::parse(ISS_LINE2, ISS_LINE1).is_err());
    }

    #[test]
    fn mismatched_catalog_numbers_are_rejected() {
        let other = ISS_LINE2.replacen("25544", "25545", 1);
        assert!(matches!(
            OrbitalElements::parse(ISS_LINE1, &other),
            Err(Error::MalformedElementSet { line: 2, .. })
        ));
    }

    #[test]
    fn zero_mean_motion_is_rejected() {
        let zero = ISS_LINE2.replacen("15.72125391", " 0.00000000", 1);
        let err = OrbitalElements::parse(ISS_LINE1, &zero).unwrap_err();
        assert!(matches!(err, Error::MalformedElementSet { line: 2, .. }));
    }

    #[test]
    fn signed_eccentricity_is_rejected() {
        let bad = ISS_LINE2.replacen("0006703", "-006703", 1);
        assert!(OrbitalElements::parse(ISS_LINE1, &bad).is_err());
    }

    #[test]
    fn epoch_extraction() {
        let t = epoch_from_line1(ISS_LINE1).unwrap();
        let day_start = Utc.with_ymd_and_hms(2008, 9, 20, 0, 0, 0).unwrap();
        assert_approx_eq!((t - day_start).num_milliseconds() as f64, 44_740_104.0, 1.0);
    }

    #[test]
    fn epoch_extraction_pivot() {
        let l1 = ISS_LINE1.replacen("08264.51782528", "57001.00000000", 1);
        let t = epoch_from_line1(&l1).unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(1957, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn epoch_extraction_rejects_garbage() {
        let l1 = ISS_LINE1.replacen("08264.51782528", "0826x.51782528", 1);
        assert!(matches!(epoch_from_line1(&l1), Err(Error::InvalidEpoch(_))));
        assert!(matches!(epoch_from_line1("1 25544U"), Err(Error::InvalidEpoch(_))));
    }

    #[test]
    fn line_precheck() {
        assert!(is_valid_line(ISS_LINE1));
        assert!(!is_valid_line(""));
        assert!(!is_valid_line("   "));
        assert!(!is_valid_line(&ISS_LINE1[..50]));
    }
}
