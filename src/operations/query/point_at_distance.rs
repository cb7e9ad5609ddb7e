use crate::error::Result;
use crate::geometry::curve::ClosedCatmullRom;
use crate::math::Point3;

use super::{ParameterAtDistance, SegmentLengthTable, SolverParams};

/// Evaluates the point reached after traveling a distance along a closed spline.
pub struct PointAtDistance {
    distance: f64,
    params: SolverParams,
}

impl PointAtDistance {
    /// Creates a new `PointAtDistance` query.
    #[must_use]
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            params: SolverParams::default(),
        }
    }

    /// Overrides the solver parameters.
    #[must_use]
    pub fn with_params(mut self, params: SolverParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the query, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`ParameterAtDistance`].
    pub fn execute(&self, curve: &ClosedCatmullRom, lengths: &SegmentLengthTable) -> Result<Point3> {
        let solution = ParameterAtDistance::new(self.distance)
            .with_params(self.params)
            .execute(curve, lengths)?;
        Ok(curve.position(solution.parameter))
    }
}
