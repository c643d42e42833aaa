//! Secondary progressions (one day after birth for each year of life).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aspects::{AspectCalculator, AspectSet, AspectSetKind};
use crate::birth::BirthData;
use crate::chart::{ChartEngine, ChartResult};
use crate::ephemeris::EphemerisProvider;
use crate::error::{ChartError, ChartRole};
use crate::interpretation;
use crate::time::{self, JulianDay};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRequest {
    pub birth: BirthData,
    /// Date the progression is cast for
    pub current_date: NaiveDate,
}

impl ProgressionRequest {
    pub fn new(birth: BirthData, current_date: NaiveDate) -> Self {
        Self {
            birth,
            current_date,
        }
    }

    /// Whole years lived; a current date before the birth is rejected.
    pub fn age_years(&self) -> Result<i32, ChartError> {
        if self.current_date < self.birth.date {
            return Err(ChartError::validation(
                "current_date",
                format!(
                    "{} precedes the birth date {}",
                    self.current_date, self.birth.date
                ),
            ));
        }
        Ok(time::age_in_years(self.birth.date, self.current_date))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    pub age_years: i32,
    pub natal: ChartResult,
    pub progressed: ChartResult,
    pub progressed_julian_day: JulianDay,
    /// Progressed points against natal points
    pub progressed_to_natal: AspectSet,
    /// Aspects within the progressed chart
    pub progressed_to_progressed: AspectSet,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    pub fn compute_progression(
        &self,
        request: &ProgressionRequest,
    ) -> Result<ProgressionResult, ChartError> {
        let age_years = request
            .age_years()
            .map_err(|e| e.in_role(ChartRole::Progressed))?;
        log::debug!("computing progression at age {}", age_years);

        let profile = self.settings.progression;
        let natal = self.natal_chart(&request.birth, ChartRole::Natal, profile)?;

        let progressed_julian_day = time::progressed_julian_day(natal.julian_day, age_years);
        let mut progressed = self
            .chart_at(
                ChartRole::Progressed,
                progressed_julian_day,
                request.birth.location(),
                natal.frame,
                profile.house_system,
            )
            .map_err(|e| e.in_role(ChartRole::Progressed))?;

        let progressed_points = progressed.aspect_points();
        let natal_points = natal.aspect_points();
        let progressed_to_natal = AspectCalculator.compute_inter_chart_aspects(
            (ChartRole::Progressed, progressed_points.as_slice()),
            (ChartRole::Natal, natal_points.as_slice()),
            AspectSetKind::ProgressedToNatal,
            &self.settings.aspects,
        );
        let progressed_to_progressed = progressed.aspects.clone();

        if self.settings.include_interpretations {
            progressed
                .interpretations
                .extend(progressed_to_natal.pairs.iter().map(interpretation::aspect));
        }

        Ok(ProgressionResult {
            age_years,
            natal,
            progressed,
            progressed_julian_day,
            progressed_to_natal,
            progressed_to_progressed,
        })
    }
}
