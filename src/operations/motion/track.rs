use crate::error::Result;
use crate::geometry::curve::ClosedCatmullRom;
use crate::math::{heading_degrees, Point3, Vector3};
use crate::operations::query::{Convergence, ParameterAtDistance, SegmentLengthTable};

/// Where an entity sits on the track and which way it faces.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Traveled distance the placement was computed for.
    pub distance: f64,
    /// Curve parameter at that distance.
    pub parameter: f64,
    /// Position on the curve.
    pub position: Point3,
    /// Unnormalized curve derivative at the position.
    pub tangent: Vector3,
    /// Heading in the horizontal plane, in degrees.
    pub heading_degrees: f64,
    /// Whether the distance solver met its tolerance.
    pub convergence: Convergence,
}

/// A closed spline together with its precomputed segment lengths.
///
/// Built once at scene setup and shared read-only by every moving entity.
#[derive(Debug, Clone)]
pub struct Track {
    curve: ClosedCatmullRom,
    lengths: SegmentLengthTable,
}

impl Track {
    /// Builds a track through the given control points.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve is invalid or has zero length.
    pub fn new(points: Vec<Point3>) -> Result<Self> {
        Self::from_curve(ClosedCatmullRom::new(points)?)
    }

    /// Builds a track from an existing curve, measuring its segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve has zero length.
    pub fn from_curve(curve: ClosedCatmullRom) -> Result<Self> {
        let lengths = SegmentLengthTable::compute(&curve)?;
        Ok(Self { curve, lengths })
    }

    /// Returns the underlying spline.
    #[must_use]
    pub fn curve(&self) -> &ClosedCatmullRom {
        &self.curve
    }

    /// Returns the precomputed segment lengths.
    #[must_use]
    pub fn lengths(&self) -> &SegmentLengthTable {
        &self.lengths
    }

    /// Length of one lap.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.lengths.total_length()
    }

    /// Places an entity that has traveled `distance` from the start of the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is not finite.
    pub fn placement_at(&self, distance: f64) -> Result<Placement> {
        let solution = ParameterAtDistance::new(distance).execute(&self.curve, &self.lengths)?;
        let tangent = self.curve.gradient(solution.parameter);
        Ok(Placement {
            distance,
            parameter: solution.parameter,
            position: self.curve.position(solution.parameter),
            tangent,
            heading_degrees: heading_degrees(&tangent),
            convergence: solution.convergence,
        })
    }
}
