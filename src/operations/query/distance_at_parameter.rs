use crate::error::{OperationError, Result};
use crate::geometry::curve::ClosedCatmullRom;

use super::{ArcLength, SegmentLengthTable};

/// Measures the distance traveled from parameter `0` to a given parameter.
///
/// Inverse of [`ParameterAtDistance`](super::ParameterAtDistance): whole
/// segments come from the length table and only the partial segment is
/// integrated. Parameters outside `[0, N]` are wrapped into one lap.
pub struct DistanceAtParameter {
    parameter: f64,
}

impl DistanceAtParameter {
    /// Creates a new `DistanceAtParameter` query.
    #[must_use]
    pub fn new(parameter: f64) -> Self {
        Self { parameter }
    }

    /// Executes the query, returning the traveled distance.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the parameter is not finite.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self, curve: &ClosedCatmullRom, lengths: &SegmentLengthTable) -> Result<f64> {
        if !self.parameter.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "parameter must be finite, got {}",
                self.parameter
            ))
            .into());
        }
        let lap = curve.segment_count() as f64;
        let s = if (0.0..=lap).contains(&self.parameter) {
            self.parameter
        } else {
            self.parameter.rem_euclid(lap)
        };

        let index = (s.floor() as usize).min(curve.segment_count() - 1);
        let start = index as f64;
        Ok(lengths.distance_before(index) + ArcLength::new(start, s).execute(curve))
    }
}
