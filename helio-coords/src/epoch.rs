//! Observation epochs as split Julian Dates.
//!
//! An [`Epoch`] stores its Julian Date in two parts (`jd1` day part plus
//! `jd2` fraction) so that sub-second precision survives across the full
//! date range. The solar ephemeris series consume the Julian-century offset
//! from J2000.0, available via
//! [`centuries_since_j2000`](Epoch::centuries_since_j2000).

use helio_core::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD, MJD_ZERO_POINT, SECONDS_PER_DAY_F64};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeParseError {
    #[error("Cannot parse '{input}' as a datetime: {message}")]
    ParseError { input: String, message: String },

    #[error("Datetime component out of range: {message}")]
    OutOfRange { message: String },
}

pub type TimeResult<T> = Result<T, TimeParseError>;

/// A Julian Date stored as two f64 parts whose sum is the full date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JulianDate {
    pub jd1: f64,
    pub jd2: f64,
}

impl JulianDate {
    pub fn new(jd1: f64, jd2: f64) -> Self {
        Self { jd1, jd2 }
    }

    pub fn from_f64(jd: f64) -> Self {
        Self::new(jd, 0.0)
    }

    pub fn j2000() -> Self {
        Self::new(J2000_JD, 0.0)
    }

    pub fn to_f64(&self) -> f64 {
        self.jd1 + self.jd2
    }

    pub fn add_days(&self, days: f64) -> Self {
        Self::new(self.jd1, self.jd2 + days)
    }

    /// Builds a split Julian Date from calendar components.
    ///
    /// jd1 holds the full Julian Date at midnight, jd2 the day fraction,
    /// following the ERFA eraCal2jd + eraDtf2d convention.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Self {
        let my = (month as i32 - 14) / 12;
        let iypmy = year + my;

        let mjd = ((1461 * (iypmy + 4800)) / 4 + (367 * (month as i32 - 2 - 12 * my)) / 12
            - (3 * ((iypmy + 4900) / 100)) / 4
            + day as i32
            - 2432076) as f64;

        let jd1 = MJD_ZERO_POINT + mjd;
        let jd2 = (60.0 * (60 * hour + minute) as f64 + second) / SECONDS_PER_DAY_F64;

        Self::new(jd1, jd2)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.9}", self.to_f64())
    }
}

/// An observation epoch.
///
/// Wraps a split Julian Date. The library treats epochs as an opaque time
/// tag; no time-scale conversion is applied (the low-precision solar series
/// are insensitive to the TT/UTC offset).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epoch(JulianDate);

impl Epoch {
    pub fn from_julian_date(jd: JulianDate) -> Self {
        Self(jd)
    }

    /// Creates an epoch from calendar components, validating ranges.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> TimeResult<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(TimeParseError::OutOfRange {
                message: format!("date {:04}-{:02}-{:02}", year, month, day),
            });
        }
        if hour > 23 || minute > 59 || !(0.0..60.0).contains(&second) {
            return Err(TimeParseError::OutOfRange {
                message: format!("time {:02}:{:02}:{}", hour, minute, second),
            });
        }
        Ok(Self(JulianDate::from_calendar(
            year, month, day, hour, minute, second,
        )))
    }

    /// The J2000.0 epoch (2000-01-01T12:00:00, JD 2451545.0).
    pub fn j2000() -> Self {
        Self(JulianDate::j2000())
    }

    pub fn to_julian_date(&self) -> JulianDate {
        self.0
    }

    pub fn days_since_j2000(&self) -> f64 {
        (self.0.jd1 - J2000_JD) + self.0.jd2
    }

    /// Julian centuries since J2000.0, the T parameter of the solar series.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }
}

impl FromStr for Epoch {
    type Err = TimeParseError;

    /// Parses ISO 8601 datetimes: `YYYY-MM-DDTHH:MM:SS[.sss][Z]`, with a
    /// space accepted in place of `T`.
    fn from_str(s: &str) -> TimeResult<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);

        let parse_error = |message: &str| TimeParseError::ParseError {
            input: s.to_string(),
            message: message.to_string(),
        };

        let sep = trimmed
            .find('T')
            .or_else(|| trimmed.find(' '))
            .ok_or_else(|| parse_error("expected YYYY-MM-DDTHH:MM:SS"))?;
        let (date_part, time_part) = trimmed.split_at(sep);
        let time_part = &time_part[1..];

        let date: Vec<&str> = date_part.split('-').collect();
        if date.len() != 3 {
            return Err(parse_error("date must be YYYY-MM-DD"));
        }
        let time: Vec<&str> = time_part.split(':').collect();
        if time.len() != 3 {
            return Err(parse_error("time must be HH:MM:SS"));
        }

        let digits = |field: &str, max_len: usize, name: &'static str| -> TimeResult<u32> {
            if field.is_empty()
                || field.len() > max_len
                || !field.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(parse_error(&format!("invalid {}: '{}'", name, field)));
            }
            field
                .parse::<u32>()
                .map_err(|_| parse_error(&format!("invalid {}: '{}'", name, field)))
        };

        let year = digits(date[0], 4, "year")? as i32;
        if date[0].len() != 4 {
            return Err(parse_error(&format!("invalid year: '{}'", date[0])));
        }
        let month = digits(date[1], 2, "month")?;
        let day = digits(date[2], 2, "day")?;
        let hour = digits(time[0], 2, "hour")?;
        let minute = digits(time[1], 2, "minute")?;
        let second = time[2]
            .parse::<f64>()
            .map_err(|_| parse_error(&format!("invalid second: '{}'", time[2])))?;
        if !second.is_finite() || second < 0.0 {
            return Err(parse_error(&format!("invalid second: '{}'", time[2])));
        }

        Self::from_calendar(year, month, day, hour, minute, second)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}
