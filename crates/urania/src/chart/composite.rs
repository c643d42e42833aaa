//! Midpoint composite of two charts.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::birth::BirthData;
use crate::chart::{ChartEngine, ChartResult};
use crate::ephemeris::{Body, EphemerisProvider, GeoLocation};
use crate::error::{ChartError, ChartRole};
use crate::positions::CelestialPosition;
use crate::time::{self, JulianDay};
use crate::zodiac::{geographic_longitude_midpoint, shortest_arc_midpoint};

/// Moment at which composite angles and cusps are cast instead of the
/// midpoint of the two births. Cast at person A's coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeReference {
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Hours east of UTC; person A's offset when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<f64>,
}

impl CompositeReference {
    pub fn parse(
        date: &str,
        time: &str,
        timezone_offset: Option<f64>,
    ) -> Result<Self, ChartError> {
        if let Some(offset) = timezone_offset {
            time::validate_timezone_offset(offset)?;
        }
        Ok(Self {
            date: time::parse_date(date)?,
            time: time::parse_time(time)?,
            timezone_offset,
        })
    }
}

/// How the composite angles were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompositeAngleMode {
    /// Temporal and spatial midpoint of the two births
    Midpoint {
        julian_day: JulianDay,
        location: GeoLocation,
    },
    /// A supplied reference moment at person A's location
    Reference {
        julian_day: JulianDay,
        location: GeoLocation,
    },
}

impl CompositeAngleMode {
    pub fn julian_day(&self) -> JulianDay {
        match *self {
            CompositeAngleMode::Midpoint { julian_day, .. }
            | CompositeAngleMode::Reference { julian_day, .. } => julian_day,
        }
    }

    pub fn location(&self) -> GeoLocation {
        match *self {
            CompositeAngleMode::Midpoint { location, .. }
            | CompositeAngleMode::Reference { location, .. } => location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResult {
    pub natal_a: ChartResult,
    pub natal_b: ChartResult,
    pub composite: ChartResult,
    pub angle_mode: CompositeAngleMode,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    /// Merge two births into one chart of shortest-arc midpoints.
    pub fn compute_composite(
        &self,
        a: &BirthData,
        b: &BirthData,
        reference: Option<&CompositeReference>,
    ) -> Result<CompositeResult, ChartError> {
        log::debug!(
            "computing composite ({} angles)",
            if reference.is_some() { "reference" } else { "midpoint" }
        );
        let profile = self.settings.composite;
        let natal_a = self.natal_chart(a, ChartRole::NatalA, profile)?;
        let natal_b = self.natal_chart(b, ChartRole::NatalB, profile)?;

        let (composite, angle_mode) = self
            .composite_chart((a, &natal_a), (b, &natal_b), reference)
            .map_err(|e| e.in_role(ChartRole::Composite))?;

        Ok(CompositeResult {
            natal_a,
            natal_b,
            composite,
            angle_mode,
        })
    }

    fn composite_chart(
        &self,
        (a, natal_a): (&BirthData, &ChartResult),
        (b, natal_b): (&BirthData, &ChartResult),
        reference: Option<&CompositeReference>,
    ) -> Result<(ChartResult, CompositeAngleMode), ChartError> {
        let frame = natal_a.frame;
        if natal_b.frame != frame {
            return Err(ChartError::validation(
                "ayanamsa",
                "both births must resolve to the same reference frame",
            ));
        }

        let positions = composite_positions(natal_a, natal_b)?;

        let angle_mode = match reference {
            None => CompositeAngleMode::Midpoint {
                julian_day: JulianDay::midpoint(natal_a.julian_day, natal_b.julian_day),
                location: GeoLocation {
                    lat: (a.latitude + b.latitude) / 2.0,
                    lon: geographic_longitude_midpoint(a.longitude, b.longitude),
                },
            },
            Some(reference) => CompositeAngleMode::Reference {
                julian_day: time::julian_day_for(
                    reference.date,
                    reference.time,
                    reference.timezone_offset.unwrap_or(a.timezone_offset),
                )?,
                location: a.location(),
            },
        };

        let jd = angle_mode.julian_day();
        let system = self.settings.composite.house_system;
        let houses = self.house_cusps(jd, angle_mode.location(), system, frame)?;
        let chart = self.assemble(ChartRole::Composite, jd, frame, positions, houses);
        Ok((chart, angle_mode))
    }
}

/// Shortest-arc midpoint of each body, retrograde if either source is.
///
/// The South Node is re-derived from the composite North Node so it stays
/// its exact antipode.
fn composite_positions(
    natal_a: &ChartResult,
    natal_b: &ChartResult,
) -> Result<Vec<CelestialPosition>, ChartError> {
    let frame = natal_a.frame;
    let mut positions = natal_a
        .positions
        .iter()
        .map(|placed| {
            let pa = &placed.position;
            let pb = &natal_b
                .position(pa.body)
                .ok_or_else(|| {
                    ChartError::domain(pa.body.id(), pa.longitude, "missing from natal_b chart")
                })?
                .position;
            CelestialPosition::new(
                pa.body,
                shortest_arc_midpoint(pa.longitude, pb.longitude),
                (pa.speed + pb.speed) / 2.0,
                pa.retrograde || pb.retrograde,
                frame,
            )
        })
        .collect::<Result<Vec<_>, ChartError>>()?;

    let north = positions.iter().find(|p| p.body == Body::NorthNode).cloned();
    if let Some(north) = north {
        for position in positions.iter_mut().filter(|p| p.body == Body::SouthNode) {
            *position = CelestialPosition::south_node_of(&north, frame)?;
        }
    }
    Ok(positions)
}
