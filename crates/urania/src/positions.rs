//! Provider answers turned into sign-classified celestial positions.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, BodyPosition, EphemerisError, EphemerisProvider, ReferenceFrame};
use crate::error::ChartError;
use crate::time::JulianDay;
use crate::vedic::{nakshatra_for_longitude, NakshatraPlacement};
use crate::zodiac::{normalize_degrees, sign_of, Dms, Sign, SIGN_SPAN};

/// A body's place on the zodiac for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialPosition {
    pub body: Body,
    /// Normalized ecliptic longitude in [0, 360)
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub dms: Dms,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<NakshatraPlacement>,
}

impl CelestialPosition {
    /// Classify a raw longitude. Sidereal frames also get a nakshatra.
    pub fn new(
        body: Body,
        raw_longitude: f64,
        speed: f64,
        retrograde: bool,
        frame: ReferenceFrame,
    ) -> Result<Self, ChartError> {
        let longitude = normalize_degrees(raw_longitude);
        let sign = checked_sign(body, longitude)?;
        let degree_in_sign = longitude - sign.index() as f64 * SIGN_SPAN;
        let nakshatra = if frame.is_sidereal() {
            Some(nakshatra_for_longitude(body.id(), longitude)?)
        } else {
            None
        };

        Ok(Self {
            body,
            longitude,
            sign,
            degree_in_sign,
            dms: Dms::from_degrees(degree_in_sign),
            speed,
            retrograde,
            nakshatra,
        })
    }

    /// The South Node: antipode of the North Node, always retrograde.
    pub fn south_node_of(
        north: &CelestialPosition,
        frame: ReferenceFrame,
    ) -> Result<Self, ChartError> {
        CelestialPosition::new(
            Body::SouthNode,
            north.longitude + 180.0,
            north.speed,
            true,
            frame,
        )
    }
}

/// Sign of a longitude, rejecting anything that lands outside the 12 signs.
fn checked_sign(body: Body, longitude: f64) -> Result<Sign, EphemerisError> {
    sign_of(longitude).ok_or(EphemerisError::SignIndexOutOfRange { body, longitude })
}

/// Compute every requested body at `jd` in `frame`.
///
/// `SouthNode` is derived from the North Node, which is queried even when
/// only the South Node is requested. Output follows the order of `bodies`.
/// Any failing body aborts the whole computation.
pub fn compute_positions<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: JulianDay,
    frame: ReferenceFrame,
    bodies: &[Body],
) -> Result<Vec<CelestialPosition>, ChartError> {
    log::debug!("computing {} positions at JD {}", bodies.len(), jd.value());

    let mut north_node: Option<CelestialPosition> = None;
    let mut positions = Vec::with_capacity(bodies.len());

    for &body in bodies {
        let position = match body {
            Body::SouthNode => {
                let north = match &north_node {
                    Some(north) => north.clone(),
                    None => query(provider, jd, Body::NorthNode, frame)?,
                };
                CelestialPosition::south_node_of(&north, frame)?
            }
            _ => query(provider, jd, body, frame)?,
        };
        if body == Body::NorthNode {
            north_node = Some(position.clone());
        }
        positions.push(position);
    }

    Ok(positions)
}

fn query<P: EphemerisProvider + ?Sized>(
    provider: &P,
    jd: JulianDay,
    body: Body,
    frame: ReferenceFrame,
) -> Result<CelestialPosition, ChartError> {
    let BodyPosition {
        lon,
        speed_lon,
        retrograde,
    } = provider.position(jd, body, frame)?;
    CelestialPosition::new(body, lon, speed_lon, retrograde, frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::Ayanamsa;
    use crate::error::ErrorKind;

    #[test]
    fn classifies_sign_and_degree() {
        let p = CelestialPosition::new(Body::Sun, 54.5, 0.96, false, ReferenceFrame::Tropical)
            .unwrap();
        assert_eq!(p.sign, Sign::Taurus);
        assert!((p.degree_in_sign - 24.5).abs() < 1e-12);
        assert_eq!(p.dms.to_string(), "24°30'00\"");
        assert!(p.nakshatra.is_none());
    }

    #[test]
    fn raw_longitudes_are_normalized() {
        let p = CelestialPosition::new(Body::Moon, -30.0, 13.0, false, ReferenceFrame::Tropical)
            .unwrap();
        assert_eq!(p.longitude, 330.0);
        assert_eq!(p.sign, Sign::Pisces);
        let p = CelestialPosition::new(Body::Moon, 360.0, 13.0, false, ReferenceFrame::Tropical)
            .unwrap();
        assert_eq!(p.longitude, 0.0);
        assert_eq!(p.sign, Sign::Aries);
    }

    #[test]
    fn nan_longitude_is_an_ephemeris_error() {
        let err = CelestialPosition::new(Body::Mars, f64::NAN, 0.5, false, ReferenceFrame::Tropical)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ephemeris);
    }

    #[test]
    fn south_node_is_antipode_and_retrograde() {
        let frame = ReferenceFrame::Tropical;
        for lon in [0.0, 10.0, 179.99, 180.0, 311.343, 359.5] {
            let north = CelestialPosition::new(Body::NorthNode, lon, -0.05, false, frame).unwrap();
            let south = CelestialPosition::south_node_of(&north, frame).unwrap();
            assert_eq!(south.longitude, normalize_degrees(lon + 180.0));
            assert!(south.retrograde);
        }
    }

    #[test]
    fn sidereal_positions_carry_nakshatra() {
        let frame = ReferenceFrame::Sidereal(Ayanamsa::Lahiri);
        let p = CelestialPosition::new(Body::Moon, 45.0, 13.0, false, frame).unwrap();
        assert_eq!(p.nakshatra.as_ref().map(|n| n.id.as_str()), Some("rohini"));
    }
}
