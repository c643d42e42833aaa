//! Chart-calculation core: planetary positions, houses, aspects and
//! interpretive text for synastry, composite and progressed charts.
//!
//! ```no_run
//! use urania::{SwissEphemerisAdapter, BirthData, ChartEngine};
//!
//! let engine = ChartEngine::new(SwissEphemerisAdapter::built_in());
//! let a = BirthData::parse("1990-05-15", "14:30", 28.6139, 77.2090, 5.5)?;
//! let b = BirthData::parse("1988-11-02", "06:10", 19.0760, 72.8777, 5.5)?;
//! let synastry = engine.compute_synastry(&a, &b)?;
//! println!("{} cross aspects", synastry.cross_aspects.pairs.len());
//! # Ok::<(), urania::ChartError>(())
//! ```

pub mod aspects;
pub mod birth;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod interpretation;
pub mod positions;
pub mod settings;
pub mod time;
pub mod vedic;
pub mod zodiac;

pub use aspects::{AspectCalculator, AspectSet, AspectSettings, AspectType, ChartPoint};
pub use birth::BirthData;
pub use chart::{
    ChartEngine, ChartPosition, ChartResult, CompositeAngleMode, CompositeReference,
    CompositeResult, ProgressionRequest, ProgressionResult, SynastryResult,
};
pub use ephemeris::{
    Ayanamsa, Body, EphemerisError, EphemerisProvider, HouseSystem, ReferenceFrame,
    SwissEphemerisAdapter,
};
pub use error::{ChartError, ChartRole, ErrorKind};
pub use houses::{Angles, HouseCusps};
pub use positions::CelestialPosition;
pub use settings::{ChartProfile, ChartSettings};
pub use time::JulianDay;
pub use zodiac::Sign;
