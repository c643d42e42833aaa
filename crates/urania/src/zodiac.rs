//! Zodiac arithmetic on the 0–360° ecliptic circle.
//!
//! Signs, longitude normalization, angular separation, shortest-arc
//! midpoints and degree/minute/second formatting. Everything here is a pure
//! function of its arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

/// The twelve tropical/sidereal signs, in zodiac order from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

impl Sign {
    /// Sign for a zero-based index; `None` outside 0..12.
    pub fn from_index(index: usize) -> Option<Sign> {
        SIGN_ORDER.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalize degrees to [0, 360).
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which
/// is folded back to 0. NaN passes through unchanged.
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Sign index `floor(lon / 30)` of an already normalized longitude.
///
/// `None` for non-finite input or anything outside 0..12; the longitude is
/// not wrapped here.
pub fn sign_index(longitude: f64) -> Option<usize> {
    if !longitude.is_finite() {
        return None;
    }
    let index = (longitude / SIGN_SPAN).floor();
    if (0.0..12.0).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

/// Sign containing a longitude (any finite value, normalized first).
pub fn sign_of(longitude: f64) -> Option<Sign> {
    sign_index(normalize_degrees(longitude)).and_then(Sign::from_index)
}

/// Angular separation on the circle, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let raw = (normalize_degrees(a) - normalize_degrees(b)).abs();
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

/// Midpoint halfway along the shorter arc between two longitudes.
///
/// When the points are more than 180° apart the naive mean lands on the far
/// side of the circle, so it is rotated by 180°.
pub fn shortest_arc_midpoint(a: f64, b: f64) -> f64 {
    let a = normalize_degrees(a);
    let b = normalize_degrees(b);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let mean = (low + high) / 2.0;
    if high - low > 180.0 {
        normalize_degrees(mean + 180.0)
    } else {
        mean
    }
}

/// Shortest-arc midpoint of two geographic longitudes in [-180, 180].
pub fn geographic_longitude_midpoint(a: f64, b: f64) -> f64 {
    let mid = shortest_arc_midpoint(a, b);
    if mid > 180.0 {
        mid - 360.0
    } else {
        mid
    }
}

/// Degree/minute/second breakdown of an angle (seconds truncated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    /// Truncating conversion so 29.99999° never rounds up to 30°00'00".
    pub fn from_degrees(value: f64) -> Self {
        let total_seconds = (value.abs() * 3600.0).floor() as u64;
        Self {
            degrees: (total_seconds / 3600) as u32,
            minutes: ((total_seconds % 3600) / 60) as u32,
            seconds: (total_seconds % 60) as u32,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{:02}'{:02}\"", self.degrees, self.minutes, self.seconds)
    }
}
