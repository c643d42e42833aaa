#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::NaiveDate;
use urania::ephemeris::{
    Body, BodyPosition, EphemerisError, EphemerisProvider, GeoLocation, HousePositions,
    HouseSystem, ReferenceFrame,
};
use urania::{BirthData, JulianDay};

pub const FIXTURE_EPOCH: f64 = 2_451_545.0;

/// Provider with hand-set answers.
///
/// Each body moves linearly from its base longitude at `FIXTURE_EPOCH` with
/// its configured speed, so births on different days see different skies.
/// Houses ignore time and place.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    pub bodies: BTreeMap<Body, BodyPosition>,
    pub cusps: Vec<f64>,
    pub ascendant: f64,
    pub midheaven: f64,
}

impl FixtureProvider {
    /// Static sky: no body lies within 5° of either node.
    pub fn new() -> Self {
        let mut provider = Self {
            bodies: BTreeMap::new(),
            cusps: vec![
                100.0, 125.0, 150.0, 180.0, 215.0, 250.0, 280.0, 305.0, 330.0, 0.0, 35.0, 70.0,
            ],
            ascendant: 100.0,
            midheaven: 0.0,
        };
        let sky = [
            (Body::Sun, 10.0),
            (Body::Moon, 100.0),
            (Body::Mercury, 25.0),
            (Body::Venus, 40.0),
            (Body::Mars, 190.0),
            (Body::Jupiter, 250.0),
            (Body::Saturn, 290.0),
            (Body::Uranus, 275.0),
            (Body::Neptune, 283.0),
            (Body::Pluto, 226.0),
            (Body::NorthNode, 140.0),
        ];
        for (body, lon) in sky {
            provider = provider.with_position(body, lon, 0.0, false);
        }
        provider
    }

    pub fn with_position(mut self, body: Body, lon: f64, speed: f64, retrograde: bool) -> Self {
        self.bodies.insert(
            body,
            BodyPosition {
                lon,
                speed_lon: speed,
                retrograde,
            },
        );
        self
    }

    pub fn with_cusps(mut self, cusps: Vec<f64>) -> Self {
        self.cusps = cusps;
        self
    }
}

impl EphemerisProvider for FixtureProvider {
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        _frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError> {
        let base = self
            .bodies
            .get(&body)
            .copied()
            .ok_or(EphemerisError::UnsupportedBody { body })?;
        Ok(BodyPosition {
            lon: base.lon + base.speed_lon * (jd.value() - FIXTURE_EPOCH),
            ..base
        })
    }

    fn houses(
        &self,
        _jd: JulianDay,
        _location: GeoLocation,
        system: HouseSystem,
        _frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError> {
        Ok(HousePositions {
            system,
            cusps: self.cusps.clone(),
            ascendant: self.ascendant,
            midheaven: self.midheaven,
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 1990-05-15 14:30 IST, New Delhi.
pub fn delhi_birth() -> BirthData {
    BirthData::parse("1990-05-15", "14:30:00", 28.6139, 77.2090, 5.5).unwrap()
}

/// 1985-09-03 07:45 EDT, New York.
pub fn new_york_birth() -> BirthData {
    BirthData::parse("1985-09-03", "07:45", 40.7128, -74.0060, -4.0).unwrap()
}

/// Delegates to `early` before `boundary` and to `late` from it on, so two
/// births can see the same body moving differently.
#[derive(Debug, Clone)]
pub struct EraProvider {
    pub early: FixtureProvider,
    pub late: FixtureProvider,
    pub boundary: f64,
}

impl EraProvider {
    fn era(&self, jd: JulianDay) -> &FixtureProvider {
        if jd.value() < self.boundary {
            &self.early
        } else {
            &self.late
        }
    }
}

impl EphemerisProvider for EraProvider {
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError> {
        self.era(jd).position(jd, body, frame)
    }

    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError> {
        self.era(jd).houses(jd, location, system, frame)
    }
}
