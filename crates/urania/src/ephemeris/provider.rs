use crate::ephemeris::types::{
    Body, BodyPosition, GeoLocation, HousePositions, HouseSystem, ReferenceFrame,
};
use crate::time::JulianDay;
use thiserror::Error;

/// Errors raised by an ephemeris provider or by the consistency checks run
/// on its answers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Provider does not support {body}")]
    UnsupportedBody { body: Body },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("Longitude {longitude} for {body} has no sign index in 0..12")]
    SignIndexOutOfRange { body: Body, longitude: f64 },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Expected 12 house cusps, provider returned {found}")]
    CuspCount { found: usize },
    #[error("House cusp {house} is not a finite longitude: {value}")]
    InvalidCusp { house: usize, value: f64 },
    #[error("Provider returned non-finite {angle}: {value}")]
    InvalidAngle { angle: &'static str, value: f64 },
}

/// A source of planetary longitudes and house cusps.
///
/// The reference frame travels with every call, so an implementation must
/// not keep zodiac mode as ambient state between calls. Implementations are
/// shared across threads.
pub trait EphemerisProvider: Send + Sync {
    /// Ecliptic longitude and motion of one body at `jd` (UT).
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError>;

    /// House cusps and angles for a moment and location.
    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError> {
        (**self).position(jd, body, frame)
    }

    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError> {
        (**self).houses(jd, location, system, frame)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for std::sync::Arc<P> {
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError> {
        (**self).position(jd, body, frame)
    }

    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError> {
        (**self).houses(jd, location, system, frame)
    }
}
