//! Sidereal (Vedic) annotations applied to chart positions.

pub mod nakshatra;

pub use nakshatra::{nakshatra_for_longitude, NakshatraPlacement, NAKSHATRA_ORDER};
