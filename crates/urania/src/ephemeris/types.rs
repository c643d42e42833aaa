use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive
    pub lat: f64,
    /// Longitude in degrees, east positive
    pub lon: f64,
}

/// Bodies tracked in every chart.
///
/// `SouthNode` is never queried from a provider; it is derived from the
/// north node by the position calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
}

/// Bodies requested from the provider, in chart order.
pub const QUERIED_BODIES: [Body; 11] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::NorthNode,
];

impl Body {
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::NorthNode => "North Node",
            Body::SouthNode => "South Node",
        }
    }

    pub fn is_node(self) -> bool {
        matches!(self, Body::NorthNode | Body::SouthNode)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sidereal reference systems.
///
/// Each system reduces to its ayanamsa at J2000.0; the value at any other
/// epoch adds general precession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    Lahiri,
    FaganBradley,
    DeLuce,
    Raman,
    Krishnamurti,
    Yukteshwar,
    DjwhalKhul,
}

const AYANAMSAS: &[(&str, Ayanamsa)] = &[
    ("lahiri", Ayanamsa::Lahiri),
    ("chitrapaksha", Ayanamsa::Lahiri),
    ("fagan_bradley", Ayanamsa::FaganBradley),
    ("de_luce", Ayanamsa::DeLuce),
    ("raman", Ayanamsa::Raman),
    ("krishnamurti", Ayanamsa::Krishnamurti),
    ("yukteshwar", Ayanamsa::Yukteshwar),
    ("djwhal_khul", Ayanamsa::DjwhalKhul),
];

impl Ayanamsa {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Ayanamsa::Lahiri => 23.853,
            Ayanamsa::FaganBradley => 24.736,
            Ayanamsa::DeLuce => 21.619,
            Ayanamsa::Raman => 22.370,
            Ayanamsa::Krishnamurti => 23.850,
            Ayanamsa::Yukteshwar => 22.460,
            Ayanamsa::DjwhalKhul => 22.883,
        }
    }

    /// Ayanamsa in degrees at Julian centuries `t` from J2000.0.
    ///
    /// General precession in longitude (IAU 2006, two leading terms).
    pub fn degrees_at(self, t: f64) -> f64 {
        let precession_arcsec = 5028.796195 * t + 1.1054348 * t * t;
        self.reference_j2000_deg() + precession_arcsec / 3600.0
    }

    /// Look up an ayanamsa by name (case-insensitive, aliases accepted).
    pub fn from_name(name: &str) -> Option<Ayanamsa> {
        let wanted = name.trim().to_lowercase();
        AYANAMSAS
            .iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, ayanamsa)| *ayanamsa)
    }

    pub fn valid_names() -> Vec<String> {
        AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect()
    }
}

/// Zodiac reference frame passed explicitly on every provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "zodiac", content = "ayanamsa", rename_all = "lowercase")]
pub enum ReferenceFrame {
    Tropical,
    Sidereal(Ayanamsa),
}

impl ReferenceFrame {
    pub fn is_sidereal(&self) -> bool {
        matches!(self, ReferenceFrame::Sidereal(_))
    }

    /// Same frame with the ayanamsa replaced, if sidereal.
    pub fn with_ayanamsa(self, ayanamsa: Option<Ayanamsa>) -> ReferenceFrame {
        match (self, ayanamsa) {
            (ReferenceFrame::Sidereal(_), Some(chosen)) => ReferenceFrame::Sidereal(chosen),
            (frame, _) => frame,
        }
    }
}

/// House division used for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    /// Equal 30° houses starting at the Ascendant's sign
    WholeSign,
    /// Unequal semi-arc houses computed by the provider
    Placidus,
}

impl HouseSystem {
    pub fn is_cuspal(self) -> bool {
        !matches!(self, HouseSystem::WholeSign)
    }
}

/// Raw provider answer for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees (not necessarily normalized)
    pub lon: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
    /// Whether the body is in apparent retrograde motion
    pub retrograde: bool,
}

/// Raw provider answer for house cusps and angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePositions {
    pub system: HouseSystem,
    /// House cusps 1..12 in order, degrees
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}
