//! Chart pipelines: natal, synastry, composite and progression.
//!
//! Every pipeline is a single pass over the shared position, house and
//! aspect calculators. [`ChartEngine`] holds no per-request state, so one
//! engine can serve concurrent requests.

pub mod composite;
pub mod natal;
pub mod progression;
pub mod synastry;

use serde::{Deserialize, Serialize};

use crate::aspects::{Angle, AspectPoint, AspectSet, ChartPoint};
use crate::ephemeris::{Body, EphemerisProvider, HouseSystem, ReferenceFrame};
use crate::error::{ChartError, ChartRole};
use crate::houses::HouseCusps;
use crate::interpretation::Interpretation;
use crate::positions::CelestialPosition;
use crate::settings::ChartSettings;
use crate::time::JulianDay;

pub use composite::{CompositeAngleMode, CompositeReference, CompositeResult};
pub use progression::{ProgressionRequest, ProgressionResult};
pub use synastry::{HouseOverlay, NodalContact, SynastryResult};

/// A position together with the house it falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPosition {
    #[serde(flatten)]
    pub position: CelestialPosition,
    pub house: u8,
}

/// One fully computed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub role: ChartRole,
    pub julian_day: JulianDay,
    pub frame: ReferenceFrame,
    pub house_system: HouseSystem,
    pub positions: Vec<ChartPosition>,
    pub houses: HouseCusps,
    pub aspects: AspectSet,
    pub interpretations: Vec<Interpretation>,
}

impl ChartResult {
    pub fn position(&self, body: Body) -> Option<&ChartPosition> {
        self.positions.iter().find(|p| p.position.body == body)
    }

    /// Points that take part in aspects: every body plus the Ascendant.
    pub fn aspect_points(&self) -> Vec<AspectPoint> {
        aspect_points(
            self.positions.iter().map(|p| &p.position),
            self.houses.angles.ascendant,
        )
    }
}

pub(crate) fn aspect_points<'a>(
    positions: impl Iterator<Item = &'a CelestialPosition>,
    ascendant: f64,
) -> Vec<AspectPoint> {
    positions
        .map(|p| AspectPoint {
            point: ChartPoint::Body(p.body),
            longitude: p.longitude,
            speed: p.speed,
            retrograde: p.retrograde,
        })
        .chain(std::iter::once(AspectPoint {
            point: ChartPoint::Angle(Angle::Ascendant),
            longitude: ascendant,
            speed: 0.0,
            retrograde: false,
        }))
        .collect()
}

/// Entry point for all chart computations.
pub struct ChartEngine<P> {
    provider: P,
    settings: ChartSettings,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            settings: ChartSettings::default(),
        }
    }

    pub fn with_settings(provider: P, settings: ChartSettings) -> Result<Self, ChartError> {
        settings.validate()?;
        Ok(Self { provider, settings })
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
