use crate::error::{GeometryError, Result};
use crate::math::{wrap_index, Point3, Vector3};

use super::{Curve, CurveDomain};

/// A closed uniform Catmull-Rom spline through an ordered loop of control points.
///
/// The curve parameter `s` splits into a segment index `floor(s)` and an
/// in-segment position `s - floor(s)`. Segment `i` is interpolated from the
/// window `P[i], P[i+1], P[i+2], P[i+3]` (indices taken modulo the point
/// count) and runs from `P[i+1]` to `P[i+2]`. The parameter itself is never
/// wrapped, only the control point indices.
#[derive(Debug, Clone)]
pub struct ClosedCatmullRom {
    points: Vec<Point3>,
}

impl ClosedCatmullRom {
    /// Smallest number of control points that fills a 4-point window.
    pub const MIN_POINTS: usize = 4;

    /// Creates a closed spline from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidCurve`] if fewer than
    /// [`Self::MIN_POINTS`] points are given, or
    /// [`GeometryError::NonFinitePoint`] if any coordinate is NaN or infinite.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        if points.len() < Self::MIN_POINTS {
            return Err(GeometryError::InvalidCurve {
                count: points.len(),
            }
            .into());
        }
        if let Some(index) = points
            .iter()
            .position(|p| !p.coords.iter().all(|c| c.is_finite()))
        {
            return Err(GeometryError::NonFinitePoint { index }.into());
        }
        Ok(Self { points })
    }

    /// Returns the control points in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Number of control points, which is also the number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the control point at a cyclic index (negative indices allowed).
    #[must_use]
    pub fn point(&self, k: i64) -> &Point3 {
        &self.points[wrap_index(k, self.points.len())]
    }

    /// Splits `s` into the local parameter and the 4-point window it selects.
    ///
    /// The segment index is reduced into `[0, N)` while still a float, so
    /// parameters of any magnitude stay clear of integer overflow.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn window(&self, s: f64) -> (f64, [&Point3; 4]) {
        let base = s.floor();
        let inner = s - base;
        let i1 = base.rem_euclid(self.points.len() as f64) as i64;
        (
            inner,
            [
                self.point(i1),
                self.point(i1 + 1),
                self.point(i1 + 2),
                self.point(i1 + 3),
            ],
        )
    }

    /// Position on the curve at parameter `s`.
    #[must_use]
    pub fn position(&self, s: f64) -> Point3 {
        let (u, [v1, v2, v3, v4]) = self.window(s);
        let u2 = u * u;
        let u3 = u2 * u;

        let b1 = -u3 + 2.0 * u2 - u;
        let b2 = 3.0 * u3 - 5.0 * u2 + 2.0;
        let b3 = -3.0 * u3 + 4.0 * u2 + u;
        let b4 = u3 - u2;

        Point3::from(0.5 * (b1 * v1.coords + b2 * v2.coords + b3 * v3.coords + b4 * v4.coords))
    }

    /// Analytic first derivative of [`Self::position`] with respect to `s`.
    #[must_use]
    pub fn gradient(&self, s: f64) -> Vector3 {
        let (u, [v1, v2, v3, v4]) = self.window(s);
        let u2 = u * u;

        let f1 = -3.0 * u2 + 4.0 * u - 1.0;
        let f2 = 9.0 * u2 - 10.0 * u;
        let f3 = -9.0 * u2 + 8.0 * u + 1.0;
        let f4 = 3.0 * u2 - 2.0 * u;

        0.5 * (f1 * v1.coords + f2 * v2.coords + f3 * v3.coords + f4 * v4.coords)
    }
}

impl Curve for ClosedCatmullRom {
    fn evaluate(&self, s: f64) -> Point3 {
        self.position(s)
    }

    fn derivative(&self, s: f64) -> Vector3 {
        self.gradient(s)
    }

    #[allow(clippy::cast_precision_loss)]
    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.points.len() as f64)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
