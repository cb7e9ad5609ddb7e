use crate::geometry::curve::Curve;
use crate::math::{inverse_lerp, lerp};

/// Nodes and weights of 3-point Gauss-Legendre quadrature on `[-1, 1]`.
///
/// Exact for polynomials up to degree 5.
const GAUSS_LEGENDRE_3: [(f64, f64); 3] = [
    (-0.774_596_669_241_483_4, 5.0 / 9.0),
    (0.0, 8.0 / 9.0),
    (0.774_596_669_241_483_4, 5.0 / 9.0),
];

/// Estimates the arc length of a curve between two parameters.
///
/// Integrates the derivative magnitude with fixed 3-point Gauss-Legendre
/// quadrature over the whole interval, without adaptive refinement. This is
/// accurate for an interval inside one spline segment; longer spans should be
/// split at segment boundaries (see
/// [`SegmentLengthTable`](super::SegmentLengthTable)).
pub struct ArcLength {
    lower: f64,
    upper: f64,
}

impl ArcLength {
    /// Creates a new `ArcLength` query over `[lower, upper]`.
    #[must_use]
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Executes the query, returning the arc length.
    ///
    /// The result is signed: it is negative when `upper < lower`.
    #[must_use]
    pub fn execute<C: Curve>(&self, curve: &C) -> f64 {
        let sum: f64 = GAUSS_LEGENDRE_3
            .iter()
            .map(|&(node, weight)| {
                let s = lerp(self.lower, self.upper, inverse_lerp(-1.0, 1.0, node));
                weight * curve.derivative(s).norm()
            })
            .sum();
        sum * (self.upper - self.lower) / 2.0
    }
}
