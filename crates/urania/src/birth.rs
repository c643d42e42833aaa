//! Birth data accepted by the chart pipelines.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{Ayanamsa, GeoLocation};
use crate::error::ChartError;
use crate::time::{self, JulianDay};

/// Date, time and place of a birth.
///
/// The request layer is expected to hand over data that already passes
/// [`BirthData::validate`]; the pipelines check again before computing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Degrees, north positive, [-90, 90]
    pub latitude: f64,
    /// Degrees, east positive, [-180, 180]
    pub longitude: f64,
    /// Hours east of UTC, [-14, 14]; fractional offsets allowed
    pub timezone_offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sidereal reference used when the chart profile is sidereal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<Ayanamsa>,
}

impl BirthData {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        latitude: f64,
        longitude: f64,
        timezone_offset: f64,
    ) -> Self {
        Self {
            date,
            time,
            latitude,
            longitude,
            timezone_offset,
            name: None,
            ayanamsa: None,
        }
    }

    /// Build from request strings, validating every field.
    pub fn parse(
        date: &str,
        time: &str,
        latitude: f64,
        longitude: f64,
        timezone_offset: f64,
    ) -> Result<Self, ChartError> {
        let birth = Self::new(
            time::parse_date(date)?,
            time::parse_time(time)?,
            latitude,
            longitude,
            timezone_offset,
        );
        birth.validate()?;
        Ok(birth)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an ayanamsa by name, rejecting unknown names.
    pub fn with_ayanamsa_name(mut self, name: &str) -> Result<Self, ChartError> {
        let ayanamsa = Ayanamsa::from_name(name).ok_or_else(|| {
            ChartError::validation(
                "ayanamsa",
                format!("unknown ayanamsa {:?}; valid: {:?}", name, Ayanamsa::valid_names()),
            )
        })?;
        self.ayanamsa = Some(ayanamsa);
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)?;
        time::validate_timezone_offset(self.timezone_offset)
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    pub fn julian_day(&self) -> Result<JulianDay, ChartError> {
        time::julian_day_for(self.date, self.time, self.timezone_offset)
    }
}

fn check_range(field: &str, value: f64, limit: f64) -> Result<(), ChartError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(ChartError::validation(
            field,
            format!("must be within [-{limit}, {limit}], got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_birth() {
        let birth = BirthData::parse("1990-05-15", "14:30:00", 28.6139, 77.2090, 5.5).unwrap();
        assert_eq!(birth.date, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert_eq!(birth.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert!(birth.julian_day().is_ok());
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let err = BirthData::parse("1990-05-15", "14:30", 91.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("latitude"));
        let err = BirthData::parse("1990-05-15", "14:30", 0.0, -180.5, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("longitude"));
        let err = BirthData::parse("1990-05-15", "14:30", f64::NAN, 0.0, 0.0).unwrap_err();
        assert_eq!(err.field(), Some("latitude"));
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(BirthData::parse("1990-05-15", "00:00", -90.0, 180.0, -14.0).is_ok());
    }

    #[test]
    fn unknown_ayanamsa_is_a_validation_error() {
        let birth = BirthData::parse("1990-05-15", "14:30", 0.0, 0.0, 0.0).unwrap();
        let err = birth.clone().with_ayanamsa_name("galactic").unwrap_err();
        assert_eq!(err.field(), Some("ayanamsa"));
        let birth = birth.with_ayanamsa_name("fagan_bradley").unwrap();
        assert_eq!(birth.ayanamsa, Some(Ayanamsa::FaganBradley));
    }
}
