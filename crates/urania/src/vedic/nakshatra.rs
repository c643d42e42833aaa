//! Nakshatras: the 27 lunar mansions of the sidereal zodiac.
//!
//! Each spans 13°20' (360/27 degrees) and is split into four padas.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display name, ruling body)
pub const NAKSHATRA_ORDER: [(&str, &str, &str); 27] = [
    ("ashwini", "Ashwini", "ketu"),
    ("bharani", "Bharani", "venus"),
    ("krittika", "Krittika", "sun"),
    ("rohini", "Rohini", "moon"),
    ("mrigashira", "Mrigashira", "mars"),
    ("ardra", "Ardra", "rahu"),
    ("punarvasu", "Punarvasu", "jupiter"),
    ("pushya", "Pushya", "saturn"),
    ("ashlesha", "Ashlesha", "mercury"),
    ("magha", "Magha", "ketu"),
    ("purva_phalguni", "Purva Phalguni", "venus"),
    ("uttara_phalguni", "Uttara Phalguni", "sun"),
    ("hasta", "Hasta", "moon"),
    ("chitra", "Chitra", "mars"),
    ("swati", "Swati", "rahu"),
    ("vishakha", "Vishakha", "jupiter"),
    ("anuradha", "Anuradha", "saturn"),
    ("jyeshtha", "Jyeshtha", "mercury"),
    ("mula", "Mula", "ketu"),
    ("purva_ashadha", "Purva Ashadha", "venus"),
    ("uttara_ashadha", "Uttara Ashadha", "sun"),
    ("shravana", "Shravana", "moon"),
    ("dhanishta", "Dhanishta", "mars"),
    ("shatabhisha", "Shatabhisha", "rahu"),
    ("purva_bhadrapada", "Purva Bhadrapada", "jupiter"),
    ("uttara_bhadrapada", "Uttara Bhadrapada", "saturn"),
    ("revati", "Revati", "mercury"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub id: String,
    pub name: String,
    pub lord: String,
    /// Zero-based position in [`NAKSHATRA_ORDER`]
    pub index: usize,
    pub start_degree: f64,
    pub end_degree: f64,
    /// Quarter within the nakshatra, 1..=4
    pub pada: u8,
    pub pada_fraction: f64,
}

/// Nakshatra and pada holding a normalized sidereal longitude.
///
/// `point` names the body for the error raised when the longitude is outside
/// [0, 360) and so falls in none of the 27 buckets.
pub fn nakshatra_for_longitude(
    point: &str,
    longitude: f64,
) -> Result<NakshatraPlacement, ChartError> {
    let out_of_range =
        || ChartError::domain(point, longitude, "no nakshatra contains this longitude");
    if !(0.0..360.0).contains(&longitude) {
        return Err(out_of_range());
    }

    let index = (longitude / NAKSHATRA_SEGMENT_SIZE).floor() as usize;
    let (id, name, lord) = NAKSHATRA_ORDER.get(index).copied().ok_or_else(out_of_range)?;

    let start = index as f64 * NAKSHATRA_SEGMENT_SIZE;
    let offset = longitude - start;
    // min() guards float rounding right at a segment's upper edge
    let quarter = ((offset / PADA_SIZE).floor() as u8).min(3);
    let pada_fraction = (offset - quarter as f64 * PADA_SIZE) / PADA_SIZE;

    Ok(NakshatraPlacement {
        id: id.to_string(),
        name: name.to_string(),
        lord: lord.to_string(),
        index,
        start_degree: start,
        end_degree: start + NAKSHATRA_SEGMENT_SIZE,
        pada: quarter + 1,
        pada_fraction,
    })
}
