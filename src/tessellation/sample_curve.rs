use crate::error::{GeometryError, Result, SamplingError};
use crate::geometry::curve::Curve;
use crate::math::heading_degrees;

use super::{parameter_step, CurveSample, SamplingParams};

/// Samples a curve at roughly equal arc-length spacing.
///
/// Walks the parameter forward from `start`, stepping by
/// [`parameter_step`] at each sample. Intended for one-shot layout of
/// static geometry such as sleepers along a rail; per-frame motion should
/// use [`ParameterAtDistance`](crate::operations::query::ParameterAtDistance)
/// instead.
pub struct SampleCurve {
    params: SamplingParams,
}

impl SampleCurve {
    /// Creates a new `SampleCurve` operation.
    #[must_use]
    pub fn new(params: SamplingParams) -> Self {
        Self { params }
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidParameters`] for a non-positive spacing,
    /// non-finite bounds or a zero sample limit, [`SamplingError::LimitExceeded`]
    /// if more than `max_samples` would be produced, and
    /// [`GeometryError::DegenerateTangent`] if the curve stops moving at a
    /// sampled parameter.
    pub fn execute<C: Curve>(&self, curve: &C) -> Result<Vec<CurveSample>> {
        let SamplingParams {
            spacing,
            start,
            end,
            max_samples,
        } = self.params;
        let end = end.unwrap_or(start + curve.domain().span());

        if !(spacing > 0.0 && spacing.is_finite()) {
            return Err(SamplingError::InvalidParameters(format!(
                "spacing must be positive, got {spacing}"
            ))
            .into());
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(SamplingError::InvalidParameters(format!(
                "sampling range [{start}, {end}) must be finite"
            ))
            .into());
        }
        if max_samples == 0 {
            return Err(SamplingError::InvalidParameters("max_samples must be positive".into()).into());
        }

        let mut samples = Vec::new();
        let mut s = start;
        while s < end {
            if samples.len() == max_samples {
                return Err(SamplingError::LimitExceeded { limit: max_samples }.into());
            }
            let tangent = curve.derivative(s);
            let step = parameter_step(spacing, &tangent)
                .ok_or(GeometryError::DegenerateTangent { parameter: s })?;
            samples.push(CurveSample {
                parameter: s,
                point: curve.evaluate(s),
                tangent,
                heading_degrees: heading_degrees(&tangent),
            });
            s += step;
        }
        Ok(samples)
    }
}
