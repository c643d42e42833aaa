//! House cusps, angles and house assignment.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisError, HousePositions, HouseSystem};
use crate::zodiac::{normalize_degrees, sign_index};

pub const HOUSE_COUNT: usize = 12;

/// The four chart angles, normalized to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
}

impl Angles {
    pub fn new(ascendant: f64, midheaven: f64) -> Self {
        let ascendant = normalize_degrees(ascendant);
        let midheaven = normalize_degrees(midheaven);
        Self {
            ascendant,
            midheaven,
            descendant: normalize_degrees(ascendant + 180.0),
            imum_coeli: normalize_degrees(midheaven + 180.0),
        }
    }
}

/// Twelve validated cusps plus the angles they were computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub system: HouseSystem,
    /// Cusps of houses 1..12, normalized
    pub cusps: Vec<f64>,
    pub angles: Angles,
}

impl HouseCusps {
    /// Validate a provider answer: exactly 12 finite cusps and finite angles.
    pub fn from_provider(
        system: HouseSystem,
        raw: &HousePositions,
    ) -> Result<Self, EphemerisError> {
        if raw.cusps.len() != HOUSE_COUNT {
            return Err(EphemerisError::CuspCount {
                found: raw.cusps.len(),
            });
        }
        if let Some((index, &value)) = raw.cusps.iter().enumerate().find(|(_, c)| !c.is_finite())
        {
            return Err(EphemerisError::InvalidCusp {
                house: index + 1,
                value,
            });
        }
        for (angle, value) in [("ascendant", raw.ascendant), ("midheaven", raw.midheaven)] {
            if !value.is_finite() {
                return Err(EphemerisError::InvalidAngle { angle, value });
            }
        }

        Ok(Self {
            system,
            cusps: raw.cusps.iter().copied().map(normalize_degrees).collect(),
            angles: Angles::new(raw.ascendant, raw.midheaven),
        })
    }

    /// House (1..=12) holding a longitude under this chart's system.
    pub fn house_of(&self, longitude: f64) -> u8 {
        match self.system {
            HouseSystem::WholeSign => whole_sign_house(longitude, self.angles.ascendant),
            HouseSystem::Placidus => cuspal_house(longitude, &self.cusps),
        }
    }
}

/// Whole-sign house: count signs from the Ascendant's sign.
///
/// Falls back to house 12 for a non-finite longitude or Ascendant, like
/// [`cuspal_house`] does for malformed cusps.
pub fn whole_sign_house(longitude: f64, ascendant: f64) -> u8 {
    let point = sign_index(normalize_degrees(longitude));
    let first = sign_index(normalize_degrees(ascendant));
    match (point, first) {
        (Some(point), Some(first)) => ((point + HOUSE_COUNT - first) % HOUSE_COUNT + 1) as u8,
        _ => {
            log::warn!(
                "longitude {} against ascendant {} has no sign; assigning house 12",
                longitude,
                ascendant
            );
            12
        }
    }
}

/// Cuspal house: the `i` with `c[i] <= lon < c[i + 1]`, wrapping past 0°.
///
/// Falls back to house 12 when nothing matches, which only happens with
/// malformed cusps.
pub fn cuspal_house(longitude: f64, cusps: &[f64]) -> u8 {
    let lon = normalize_degrees(longitude);
    let count = cusps.len();
    for i in 0..count {
        let start = cusps[i];
        let mut end = cusps[(i + 1) % count];
        if end < start {
            end += 360.0;
        }
        let inside = |x: f64| start <= x && x < end;
        if inside(lon) || inside(lon + 360.0) {
            return (i + 1) as u8;
        }
    }
    log::warn!("longitude {:.4} matched no house cusp interval; assigning house 12", lon);
    12
}
