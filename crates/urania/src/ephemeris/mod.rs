pub mod adapter;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{
    Ayanamsa, Body, BodyPosition, GeoLocation, HousePositions, HouseSystem, ReferenceFrame,
    QUERIED_BODIES,
};
