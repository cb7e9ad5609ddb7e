pub mod curve;

pub use curve::{ClosedCatmullRom, Curve, CurveDomain};
