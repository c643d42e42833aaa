//! Swiss Ephemeris provider.
//!
//! The C library keeps global state (the data path among it), so every call
//! from every adapter is serialized behind one process-wide mutex. Positions
//! are always requested tropical; a sidereal frame is applied here by
//! subtracting the frame's ayanamsa, never by switching the library's global
//! sidereal mode.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{
    Body, BodyPosition, GeoLocation, HousePositions, HouseSystem, ReferenceFrame,
};
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;

const SEFLG_SWIEPH: u32 = 2;
const SEFLG_MOSEPH: u32 = 4;
const SEFLG_SPEED: u32 = 256;

static SWISS_LOCK: Mutex<()> = Mutex::new(());

fn guard() -> MutexGuard<'static, ()> {
    // The guarded value is (), so a poisoned lock carries no broken state.
    SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn body_code(body: Body) -> Option<u32> {
    let code = match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
        Body::NorthNode => 10, // SE_MEAN_NODE
        Body::SouthNode => return None,
    };
    Some(code)
}

fn house_system_code(system: HouseSystem) -> i32 {
    match system {
        HouseSystem::WholeSign => b'W' as i32,
        HouseSystem::Placidus => b'P' as i32,
    }
}

/// Swiss Ephemeris backed provider.
///
/// Reads the `.se1` data files when built with [`SwissEphemerisAdapter::new`];
/// [`SwissEphemerisAdapter::built_in`] uses the library's bundled Moshier
/// theory instead and needs no files.
#[derive(Debug, Clone)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: u32,
}

impl SwissEphemerisAdapter {
    /// File-backed adapter; the path defaults to `SWISS_EPHEMERIS_PATH`, then
    /// `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Install the Swiss Ephemeris data files or set SWISS_EPHEMERIS_PATH."
                    .to_string(),
            });
        }

        {
            let _guard = guard();
            set_ephe_path(&path.to_string_lossy());
        }
        log::info!("Swiss Ephemeris data at {}", path.display());

        Ok(Self {
            ephemeris_path: Some(path),
            flags: SEFLG_SWIEPH | SEFLG_SPEED,
        })
    }

    /// Adapter on the built-in Moshier ephemeris (no data files).
    pub fn built_in() -> Self {
        log::debug!("Swiss Ephemeris in built-in Moshier mode");
        Self {
            ephemeris_path: None,
            flags: SEFLG_MOSEPH | SEFLG_SPEED,
        }
    }

    /// Data directory in file mode; `None` in built-in mode.
    pub fn ephemeris_path(&self) -> Option<&Path> {
        self.ephemeris_path.as_deref()
    }
}

fn apply_frame(tropical: f64, jd: JulianDay, frame: ReferenceFrame) -> f64 {
    match frame {
        ReferenceFrame::Tropical => tropical,
        ReferenceFrame::Sidereal(ayanamsa) => {
            normalize_degrees(tropical - ayanamsa.degrees_at(jd.centuries_since_j2000()))
        }
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(
        &self,
        jd: JulianDay,
        body: Body,
        frame: ReferenceFrame,
    ) -> Result<BodyPosition, EphemerisError> {
        let code = body_code(body).ok_or(EphemerisError::UnsupportedBody { body })?;

        let result = {
            let _guard = guard();
            calc_ut(jd.value(), code, self.flags)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            julian_day: jd.value(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let longitude = result.out[0];
        let speed_lon = result.out[3];
        Ok(BodyPosition {
            lon: apply_frame(longitude, jd, frame),
            speed_lon,
            retrograde: speed_lon < 0.0,
        })
    }

    fn houses(
        &self,
        jd: JulianDay,
        location: GeoLocation,
        system: HouseSystem,
        frame: ReferenceFrame,
    ) -> Result<HousePositions, EphemerisError> {
        let (c, a) = {
            let _guard = guard();
            houses_ex(
                jd.value(),
                self.flags as i32,
                location.lat,
                location.lon,
                house_system_code(system),
            )
        };
        let cusps = Cusp::from_array(c);
        let angles = AscMc::from_array(a);

        let ascendant = apply_frame(angles.ascendant, jd, frame);
        let cusps = match system {
            // Whole-sign boundaries must follow the framed Ascendant's sign.
            HouseSystem::WholeSign => {
                let first = (normalize_degrees(ascendant) / 30.0).floor() * 30.0;
                (0..12)
                    .map(|house| normalize_degrees(first + 30.0 * house as f64))
                    .collect()
            }
            HouseSystem::Placidus => [
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ]
            .iter()
            .map(|&cusp| apply_frame(cusp, jd, frame))
            .collect(),
        };

        Ok(HousePositions {
            system,
            cusps,
            ascendant,
            midheaven: apply_frame(angles.mc, jd, frame),
        })
    }
}
