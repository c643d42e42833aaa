pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{
    Angle, AspectCore, AspectObjectRef, AspectPair, AspectPoint, AspectSet, AspectSetKind,
    AspectSettings, AspectType, ChartPoint,
};
