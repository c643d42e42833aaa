//! Civil date/time to Julian Day conversion.
//!
//! Birth moments arrive as local calendar strings plus a fixed offset in
//! hours. They are shifted to UTC and converted with the Gregorian Julian Day
//! formula (Meeus, *Astronomical Algorithms*, ch. 7).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
pub const MAX_TIMEZONE_OFFSET: f64 = 14.0;

lazy_static::lazy_static! {
    static ref TIME_PATTERN: regex::Regex =
        regex::Regex::new(r"^(\d{1,2}):(\d{2})(?::(\d{2}))?$").expect("valid time pattern");
}

/// Continuous UT day count. Constructed once per chart, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDay(f64);

impl JulianDay {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000_JD) / DAYS_PER_CENTURY
    }

    /// A new day count shifted by `days`.
    pub fn plus_days(self, days: f64) -> JulianDay {
        JulianDay(self.0 + days)
    }

    pub fn midpoint(a: JulianDay, b: JulianDay) -> JulianDay {
        JulianDay((a.0 + b.0) / 2.0)
    }
}

/// Julian Day of a UTC calendar moment (Gregorian calendar).
pub fn julian_day_from_utc(moment: NaiveDateTime) -> JulianDay {
    let mut year = moment.year() as f64;
    let mut month = moment.month() as f64;
    let day_fraction = (moment.hour() as f64
        + moment.minute() as f64 / 60.0
        + moment.second() as f64 / 3600.0)
        / 24.0;
    let day = moment.day() as f64 + day_fraction;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    JulianDay(
        (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5,
    )
}

/// Shift a local moment to UTC by a fixed offset in hours.
pub fn local_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    timezone_offset: f64,
) -> Result<NaiveDateTime, ChartError> {
    validate_timezone_offset(timezone_offset)?;
    let offset_seconds = (timezone_offset * 3600.0).round() as i64;
    NaiveDateTime::new(date, time)
        .checked_sub_signed(Duration::seconds(offset_seconds))
        .ok_or_else(|| ChartError::validation("date", "moment out of supported calendar range"))
}

/// Julian Day for a local date/time with a fixed UTC offset in hours.
pub fn julian_day_for(
    date: NaiveDate,
    time: NaiveTime,
    timezone_offset: f64,
) -> Result<JulianDay, ChartError> {
    Ok(julian_day_from_utc(local_to_utc(date, time, timezone_offset)?))
}

/// Parse `date` (YYYY-MM-DD) and `time` (HH:MM or HH:MM:SS) and convert.
pub fn julian_day_from_strings(
    date: &str,
    time: &str,
    timezone_offset: f64,
) -> Result<JulianDay, ChartError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    julian_day_for(date, time, timezone_offset)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        ChartError::validation("date", format!("expected YYYY-MM-DD, got {:?} ({})", value, e))
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, ChartError> {
    let invalid = || {
        ChartError::validation("time", format!("expected HH:MM or HH:MM:SS, got {:?}", value))
    };
    let captures = TIME_PATTERN.captures(value.trim()).ok_or_else(invalid)?;
    let field = |index: usize| -> u32 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };
    NaiveTime::from_hms_opt(field(1), field(2), field(3)).ok_or_else(invalid)
}

pub fn validate_timezone_offset(offset: f64) -> Result<(), ChartError> {
    if !offset.is_finite() || offset.abs() > MAX_TIMEZONE_OFFSET {
        return Err(ChartError::validation(
            "timezone_offset",
            format!("must be within [-14, 14] hours, got {}", offset),
        ));
    }
    Ok(())
}

/// Completed years between a birth date and a current date.
///
/// One less than the calendar-year difference while the current month/day
/// precedes the birthday.
pub fn age_in_years(birth: NaiveDate, current: NaiveDate) -> i32 {
    let mut years = current.year() - birth.year();
    if (current.month(), current.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// Secondary-progression moment: one ephemeris day per year of life.
pub fn progressed_julian_day(natal: JulianDay, age_years: i32) -> JulianDay {
    natal.plus_days(age_years as f64)
}
