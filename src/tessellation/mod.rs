mod sample_curve;

pub use sample_curve::SampleCurve;

use crate::math::{Point3, Vector3, TOLERANCE};

/// Parameters controlling fixed-spacing sampling of a curve.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    /// Target arc length between consecutive samples.
    pub spacing: f64,
    /// Curve parameter of the first sample.
    pub start: f64,
    /// Sampling stops before this parameter. `None` samples one full domain span.
    pub end: Option<f64>,
    /// Upper bound on the number of samples produced.
    pub max_samples: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            spacing: 0.4,
            start: 0.0,
            end: None,
            max_samples: 100_000,
        }
    }
}

/// One sample taken along a curve.
#[derive(Debug, Clone, Copy)]
pub struct CurveSample {
    /// Curve parameter of the sample.
    pub parameter: f64,
    /// Position on the curve.
    pub point: Point3,
    /// Unnormalized curve derivative at the sample.
    pub tangent: Vector3,
    /// Heading in the horizontal plane, in degrees.
    pub heading_degrees: f64,
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl From<&[CurveSample]> for Polyline {
    fn from(samples: &[CurveSample]) -> Self {
        Self {
            points: samples.iter().map(|sample| sample.point).collect(),
        }
    }
}

impl Polyline {
    /// Sum of the lengths of the polyline's edges.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Parameter increment that covers roughly `spacing` of arc length.
///
/// First-order estimate `spacing / |gradient|`: exact only while the
/// curve speed stays constant over the step, so spacing drifts where the
/// speed changes quickly. Returns `None` when the gradient vanishes.
#[must_use]
pub fn parameter_step(spacing: f64, gradient: &Vector3) -> Option<f64> {
    let speed = gradient.norm();
    (speed > TOLERANCE).then_some(spacing / speed)
}
