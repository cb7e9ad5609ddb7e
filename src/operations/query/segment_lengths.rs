use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::geometry::curve::ClosedCatmullRom;
use crate::math::TOLERANCE;

use super::ArcLength;

/// Arc length of every segment of a closed spline, computed once at setup.
///
/// `lengths()[i]` is the length between parameters `i` and `i + 1`.
#[derive(Debug, Clone)]
pub struct SegmentLengthTable {
    lengths: Vec<f64>,
    total: f64,
}

impl SegmentLengthTable {
    /// Measures every segment of `curve`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the total length is zero,
    /// e.g. when all control points coincide.
    pub fn compute(curve: &ClosedCatmullRom) -> Result<Self> {
        let lengths: Vec<f64> = (0..curve.segment_count())
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let low = i as f64;
                ArcLength::new(low, low + 1.0).execute(curve)
            })
            .collect();
        let total: f64 = lengths.iter().sum();

        if !total.is_finite() || total < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "closed curve has total length {total}"
            ))
            .into());
        }

        debug!(segments = lengths.len(), total, "segment length table computed");
        Ok(Self { lengths, total })
    }

    /// Per-segment arc lengths, indexed by segment.
    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Number of segments in the table.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    /// Length of one full lap.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total
    }

    /// Accumulated length of all segments before `index`.
    #[must_use]
    pub fn distance_before(&self, index: usize) -> f64 {
        self.lengths[..index.min(self.lengths.len())].iter().sum()
    }

    /// Finds the segment a traveled distance falls into.
    ///
    /// Walks the table from segment 0, consuming whole segments while the
    /// remaining distance is at least the segment's length. Returns the
    /// segment index and the distance left inside it. A distance past the
    /// end of the table stays in the last segment, so the remainder may
    /// exceed that segment's length.
    #[must_use]
    pub fn locate(&self, distance: f64) -> (usize, f64) {
        let last = self.lengths.len() - 1;
        let mut index = 0;
        let mut remaining = distance;
        while index < last && remaining >= self.lengths[index] {
            remaining -= self.lengths[index];
            index += 1;
        }
        (index, remaining)
    }
}
