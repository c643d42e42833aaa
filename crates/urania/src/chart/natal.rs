use crate::aspects::{AspectCalculator, AspectSetKind};
use crate::birth::BirthData;
use crate::chart::{aspect_points, ChartEngine, ChartPosition, ChartResult};
use crate::ephemeris::{EphemerisProvider, GeoLocation, HouseSystem, ReferenceFrame};
use crate::error::{ChartError, ChartRole};
use crate::houses::HouseCusps;
use crate::interpretation;
use crate::positions::{compute_positions, CelestialPosition};
use crate::settings::ChartProfile;
use crate::time::JulianDay;

impl<P: EphemerisProvider> ChartEngine<P> {
    /// Natal chart under the configured natal profile.
    pub fn compute_natal(
        &self,
        birth: &BirthData,
        role: ChartRole,
    ) -> Result<ChartResult, ChartError> {
        self.natal_chart(birth, role, self.settings.natal)
    }

    pub(crate) fn natal_chart(
        &self,
        birth: &BirthData,
        role: ChartRole,
        profile: ChartProfile,
    ) -> Result<ChartResult, ChartError> {
        self.try_natal_chart(birth, role, profile)
            .map_err(|e| e.in_role(role))
    }

    fn try_natal_chart(
        &self,
        birth: &BirthData,
        role: ChartRole,
        profile: ChartProfile,
    ) -> Result<ChartResult, ChartError> {
        birth.validate()?;
        let jd = birth.julian_day()?;
        let frame = profile.frame_for(birth.ayanamsa);
        self.chart_at(role, jd, birth.location(), frame, profile.house_system)
    }

    /// Positions, houses and aspects for one moment and place.
    pub(crate) fn chart_at(
        &self,
        role: ChartRole,
        jd: JulianDay,
        location: GeoLocation,
        frame: ReferenceFrame,
        system: HouseSystem,
    ) -> Result<ChartResult, ChartError> {
        log::debug!("building {} chart at JD {}", role, jd.value());
        let positions = compute_positions(&self.provider, jd, frame, &self.settings.bodies)?;
        let houses = self.house_cusps(jd, location, system, frame)?;
        Ok(self.assemble(role, jd, frame, positions, houses))
    }

    pub(crate) fn house_cusps(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HouseCusps, ChartError> {
        let raw = self.provider.houses(jd, location, system, frame)?;
        Ok(HouseCusps::from_provider(system, &raw)?)
    }

    /// Place positions in houses, find intra-chart aspects and attach text.
    pub(crate) fn assemble(
        &self,
        role: ChartRole,
        jd: JulianDay,
        frame: ReferenceFrame,
        positions: Vec<CelestialPosition>,
        houses: HouseCusps,
    ) -> ChartResult {
        let kind = match role {
            ChartRole::Progressed => AspectSetKind::ProgressedToProgressed,
            _ => AspectSetKind::IntraChart,
        };
        let aspects = AspectCalculator.compute_intra_chart_aspects(
            role,
            kind,
            &aspect_points(positions.iter(), houses.angles.ascendant),
            &self.settings.aspects,
        );

        let positions: Vec<ChartPosition> = positions
            .into_iter()
            .map(|position| ChartPosition {
                house: houses.house_of(position.longitude),
                position,
            })
            .collect();

        let mut interpretations = Vec::new();
        if self.settings.include_interpretations {
            for placed in &positions {
                let body = placed.position.body;
                interpretations.push(interpretation::planet_in_sign(body, placed.position.sign));
                interpretations.push(interpretation::planet_in_house(body, placed.house));
            }
            interpretations.extend(aspects.pairs.iter().map(interpretation::aspect));
        }

        ChartResult {
            role,
            julian_day: jd,
            frame,
            house_system: houses.system,
            positions,
            houses,
            aspects,
            interpretations,
        }
    }
}
