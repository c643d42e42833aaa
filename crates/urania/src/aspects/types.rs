use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ephemeris::Body;
use crate::error::ChartRole;

/// The five major (Ptolemaic) aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Every aspect, in order of canonical angle.
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Orb used when settings do not name this aspect.
    pub fn default_orb(self) -> f64 {
        match self {
            AspectType::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Chart angles that take part in aspects alongside bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    Ascendant,
    Midheaven,
}

/// Anything an aspect can connect: a body or an angle.
///
/// Serializes as the bare id (`"sun"`, `"ascendant"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPoint {
    Body(Body),
    Angle(Angle),
}

impl ChartPoint {
    pub fn id(self) -> &'static str {
        match self {
            ChartPoint::Body(body) => body.id(),
            ChartPoint::Angle(Angle::Ascendant) => "ascendant",
            ChartPoint::Angle(Angle::Midheaven) => "midheaven",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartPoint::Body(body) => body.name(),
            ChartPoint::Angle(Angle::Ascendant) => "Ascendant",
            ChartPoint::Angle(Angle::Midheaven) => "Midheaven",
        }
    }
}

impl From<Body> for ChartPoint {
    fn from(body: Body) -> Self {
        ChartPoint::Body(body)
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input to the aspect calculator: where a point is and how it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectPoint {
    pub point: ChartPoint,
    pub longitude: f64,
    /// Degrees per day; zero for angles
    pub speed: f64,
    /// Copied from the position, never re-derived from `speed`
    pub retrograde: bool,
}

/// Core aspect information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    pub aspect_type: AspectType,
    /// Canonical angle for this aspect (0, 60, 90, 120, 180)
    pub exact_angle: f64,
    /// Angular separation of the two points, in [0, 180]
    pub separation: f64,
    /// |separation - exact_angle|
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub is_applying: bool,
    /// Whether the aspect is exact (orb under 0.1°)
    pub is_exact: bool,
    /// Whether either point is moving backwards
    pub is_retrograde: bool,
}

/// Reference to a point within one chart of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectObjectRef {
    pub chart: ChartRole,
    pub point: ChartPoint,
}

/// An aspect pair between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectPair {
    pub from: AspectObjectRef,
    pub to: AspectObjectRef,
    pub aspect: AspectCore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectSetKind {
    /// All unordered pairs within one chart
    IntraChart,
    /// Person A's points against person B's
    Synastry,
    ProgressedToNatal,
    ProgressedToProgressed,
}

/// A set of aspects with the charts it spans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSet {
    pub id: String,
    pub label: String,
    pub kind: AspectSetKind,
    pub charts: Vec<ChartRole>,
    pub pairs: Vec<AspectPair>,
}

/// Settings for aspect calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    /// Maximum orb per aspect type, degrees
    pub orbs: BTreeMap<AspectType, f64>,
    /// Orb below which an aspect is flagged exact
    pub exact_threshold: f64,
}

impl AspectSettings {
    pub fn orb_for(&self, aspect_type: AspectType) -> f64 {
        self.orbs
            .get(&aspect_type)
            .copied()
            .unwrap_or_else(|| aspect_type.default_orb())
    }
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orbs: AspectType::ALL
                .iter()
                .map(|&aspect_type| (aspect_type, aspect_type.default_orb()))
                .collect(),
            exact_threshold: 0.1,
        }
    }
}
