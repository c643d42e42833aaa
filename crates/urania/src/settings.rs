//! Tunable parameters shared by every chart pipeline.

use serde::{Deserialize, Serialize};

use crate::aspects::AspectSettings;
use crate::ephemeris::{Ayanamsa, Body, HouseSystem, ReferenceFrame};
use crate::error::ChartError;

/// Zodiac and house system used for one chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartProfile {
    pub frame: ReferenceFrame,
    pub house_system: HouseSystem,
}

impl ChartProfile {
    pub const fn tropical_placidus() -> Self {
        Self {
            frame: ReferenceFrame::Tropical,
            house_system: HouseSystem::Placidus,
        }
    }

    pub const fn sidereal_whole_sign(ayanamsa: Ayanamsa) -> Self {
        Self {
            frame: ReferenceFrame::Sidereal(ayanamsa),
            house_system: HouseSystem::WholeSign,
        }
    }

    /// Frame for a birth that may name its own ayanamsa.
    ///
    /// The birth's ayanamsa only replaces the profile's in sidereal profiles;
    /// it never turns a tropical profile sidereal.
    pub fn frame_for(&self, ayanamsa: Option<Ayanamsa>) -> ReferenceFrame {
        self.frame.with_ayanamsa(ayanamsa)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub aspects: AspectSettings,
    /// Maximum separation for a planet-to-node contact, degrees
    pub nodal_contact_orb: f64,
    pub natal: ChartProfile,
    pub synastry: ChartProfile,
    pub composite: ChartProfile,
    pub progression: ChartProfile,
    pub include_interpretations: bool,
    /// Bodies placed in every chart, in output order
    pub bodies: Vec<Body>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            aspects: AspectSettings::default(),
            nodal_contact_orb: 5.0,
            natal: ChartProfile::tropical_placidus(),
            synastry: ChartProfile::tropical_placidus(),
            composite: ChartProfile::tropical_placidus(),
            progression: ChartProfile::sidereal_whole_sign(Ayanamsa::Lahiri),
            include_interpretations: true,
            bodies: vec![
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
                Body::SouthNode,
            ],
        }
    }
}

impl ChartSettings {
    pub fn validate(&self) -> Result<(), ChartError> {
        for (aspect_type, orb) in &self.aspects.orbs {
            if !orb.is_finite() || *orb < 0.0 {
                return Err(ChartError::validation(
                    format!("aspects.orbs.{}", aspect_type),
                    format!("orb must be a non-negative number, got {}", orb),
                ));
            }
        }
        if !self.nodal_contact_orb.is_finite() || self.nodal_contact_orb < 0.0 {
            return Err(ChartError::validation(
                "nodal_contact_orb",
                format!("must be a non-negative number, got {}", self.nodal_contact_orb),
            ));
        }
        if self.bodies.is_empty() {
            return Err(ChartError::validation("bodies", "at least one body is required"));
        }
        for (i, body) in self.bodies.iter().enumerate() {
            if self.bodies[..i].contains(body) {
                return Err(ChartError::validation(
                    "bodies",
                    format!("{} is listed more than once", body.id()),
                ));
            }
        }
        Ok(())
    }
}
