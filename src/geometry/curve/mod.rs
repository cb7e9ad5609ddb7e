mod catmull_rom;

pub use catmull_rom::ClosedCatmullRom;

use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Length of the parameter range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }
}

/// Trait for parametric curves in 3D space.
///
/// Implementations validate their data on construction, so evaluation
/// itself cannot fail. Closed curves accept any parameter and repeat
/// with period [`CurveDomain::span`].
pub trait Curve {
    /// Evaluates the curve at parameter `s`, returning the 3D point.
    fn evaluate(&self, s: f64) -> Point3;

    /// First derivative with respect to `s`.
    ///
    /// Not normalized: its magnitude is the parametric speed of the curve.
    fn derivative(&self, s: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}
