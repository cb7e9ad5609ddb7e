use tracing::{debug, trace, warn};

use crate::error::{OperationError, Result};
use crate::geometry::curve::ClosedCatmullRom;
use crate::math::TOLERANCE;

use super::{ArcLength, SegmentLengthTable};

/// Parameters controlling the distance-to-parameter solver.
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Accepted absolute arc-length error.
    pub tolerance: f64,
    /// Maximum number of residual evaluations.
    pub max_iterations: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_iterations: 100,
        }
    }
}

impl SolverParams {
    fn validate(&self) -> Result<()> {
        if !(self.tolerance >= 0.0 && self.tolerance.is_finite()) {
            return Err(OperationError::InvalidInput(format!(
                "solver tolerance must be finite and non-negative, got {}",
                self.tolerance
            ))
            .into());
        }
        if self.max_iterations == 0 {
            return Err(
                OperationError::InvalidInput("solver needs at least one iteration".into()).into(),
            );
        }
        Ok(())
    }
}

/// Whether the solver met its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The residual dropped below the tolerance.
    Converged,
    /// The iteration cap was reached first; the parameter is a best effort.
    IterationLimit,
}

/// Result of a [`ParameterAtDistance`] query.
#[derive(Debug, Clone, Copy)]
pub struct DistanceSolution {
    /// Curve parameter whose accumulated arc length matches the distance.
    pub parameter: f64,
    /// Solver outcome.
    pub convergence: Convergence,
    /// Number of residual evaluations performed.
    pub iterations: usize,
    /// Absolute arc-length error at `parameter`.
    pub residual: f64,
}

impl DistanceSolution {
    /// Returns `true` if the tolerance was met.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.convergence == Convergence::Converged
    }
}

/// Finds the curve parameter at which a given distance has been traveled.
///
/// The distance is measured along the curve from parameter `0`. Distances
/// in `[0, total]` are used as given; any other finite distance is wrapped
/// into one lap first. The total length itself maps to the end of the last
/// segment, `s = N`.
pub struct ParameterAtDistance {
    distance: f64,
    params: SolverParams,
}

impl ParameterAtDistance {
    /// Creates a new `ParameterAtDistance` query with default solver parameters.
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

    /// Executes the query.
    ///
    /// Localizes the segment from the length table, starts from a guess that
    /// is linear in length, then refines with Newton steps kept inside a
    /// shrinking bracket. A step that would leave the bracket, or a vanishing
    /// tangent, falls back to bisection for that iteration. Reaching the
    /// iteration cap is reported through [`DistanceSolution::convergence`],
    /// not as an error.
    ///
    /// An estimate inside the tolerance still gets one more Newton step, so
    /// the returned parameter is non-decreasing in the distance rather than
    /// depending on how many steps a given distance happened to need.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the distance is not finite,
    /// the solver parameters are invalid, or the table was not computed for
    /// a curve with the same number of segments.
    pub fn execute(
        &self,
        curve: &ClosedCatmullRom,
        lengths: &SegmentLengthTable,
    ) -> Result<DistanceSolution> {
        self.params.validate()?;
        if !self.distance.is_finite() {
            return Err(OperationError::InvalidInput(format!(
                "distance must be finite, got {}",
                self.distance
            ))
            .into());
        }
        if lengths.segment_count() != curve.segment_count() {
            return Err(OperationError::InvalidInput(format!(
                "length table has {} segments, curve has {}",
                lengths.segment_count(),
                curve.segment_count()
            ))
            .into());
        }

        let total = lengths.total_length();
        let distance = if (0.0..=total).contains(&self.distance) {
            self.distance
        } else {
            self.distance.rem_euclid(total)
        };

        let (index, remaining) = lengths.locate(distance);
        #[allow(clippy::cast_precision_loss)]
        let offset = index as f64;
        let segment_length = lengths.lengths()[index];

        let mut t = if segment_length > TOLERANCE {
            (remaining / segment_length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut lower = 0.0;
        let mut upper = 1.0;
        let mut residual = f64::INFINITY;

        for iteration in 1..=self.params.max_iterations {
            let f = ArcLength::new(offset, offset + t).execute(curve) - remaining;
            residual = f.abs();
            trace!(iteration, t, residual, "arc length residual");

            if residual < self.params.tolerance {
                let (t, residual) = polish(curve, offset, remaining, t, f, (lower, upper));
                return Ok(DistanceSolution {
                    parameter: offset + t,
                    convergence: Convergence::Converged,
                    iterations: iteration,
                    residual,
                });
            }
            if iteration == self.params.max_iterations {
                break;
            }

            let speed = curve.gradient(offset + t).norm();
            let newton = if speed > TOLERANCE {
                Some(t - f / speed)
            } else {
                debug!(parameter = offset + t, "tangent vanishes, bisecting");
                None
            };

            if f > 0.0 {
                upper = t;
                t = match newton {
                    Some(next) if next > lower => next,
                    _ => (upper + lower) / 2.0,
                };
            } else {
                lower = t;
                t = match newton {
                    Some(next) if next < upper => next,
                    _ => (upper + lower) / 2.0,
                };
            }
        }

        warn!(
            distance,
            parameter = offset + t,
            residual,
            "distance solver hit iteration limit"
        );
        Ok(DistanceSolution {
            parameter: offset + t,
            convergence: Convergence::IterationLimit,
            iterations: self.params.max_iterations,
            residual,
        })
    }
}

/// Takes one Newton step from an accepted estimate `t` with residual `f`,
/// clamped to the bracket. Keeps `t` if the step does not reduce the residual.
fn polish(
    curve: &ClosedCatmullRom,
    offset: f64,
    remaining: f64,
    t: f64,
    f: f64,
    (lower, upper): (f64, f64),
) -> (f64, f64) {
    let speed = curve.gradient(offset + t).norm();
    if speed <= TOLERANCE {
        return (t, f.abs());
    }
    let next = (t - f / speed).clamp(lower, upper);
    let polished = (ArcLength::new(offset, offset + next).execute(curve) - remaining).abs();
    if polished <= f.abs() {
        (next, polished)
    } else {
        (t, f.abs())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::LoopTrackError;
    use crate::math::Point3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn octagon() -> ClosedCatmullRom {
        ClosedCatmullRom::new(vec![
            Point3::new(0.0, -0.375, 7.0),
            Point3::new(-6.0, -0.375, 5.0),
            Point3::new(-8.0, -0.375, 1.0),
            Point3::new(-4.0, -0.375, -6.0),
            Point3::new(0.0, -0.375, -7.0),
            Point3::new(1.0, -0.375, -4.0),
            Point3::new(4.0, -0.375, -3.0),
            Point3::new(8.0, -0.375, 7.0),
        ])
        .unwrap()
    }

    fn square() -> ClosedCatmullRom {
        ClosedCatmullRom::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 10.0),
            Point3::new(0.0, 0.0, 10.0),
        ])
        .unwrap()
    }

    fn solve(curve: &ClosedCatmullRom, table: &SegmentLengthTable, d: f64) -> DistanceSolution {
        ParameterAtDistance::new(d).execute(curve, table).unwrap()
    }

    #[test]
    fn zero_distance_is_start() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let sol = solve(&curve, &table, 0.0);
        assert!(sol.is_converged());
        assert_abs_diff_eq!(sol.parameter, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn total_length_is_end_of_lap() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let sol = solve(&curve, &table, table.total_length());
        assert!(sol.is_converged());
        assert_abs_diff_eq!(sol.parameter, 8.0, epsilon = 1e-6);
    }

    #[test]
    fn round_trip_through_arc_length() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        for s0 in [0.3_f64, 1.7, 2.05, 3.5, 4.95, 6.4, 7.8] {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = s0.floor() as usize;
            #[allow(clippy::cast_precision_loss)]
            let start = index as f64;
            let d = table.distance_before(index) + ArcLength::new(start, s0).execute(&curve);

            let sol = solve(&curve, &table, d);
            assert!(sol.is_converged());
            assert!(sol.residual < 0.01);
            // residual bound divided by the slowest speed on this loop
            assert_abs_diff_eq!(sol.parameter, s0, epsilon = 0.01);
        }
    }

    fn assert_monotone(curve: &ClosedCatmullRom, steps: u32) {
        let table = SegmentLengthTable::compute(curve).unwrap();
        let total = table.total_length();
        let mut previous = f64::NEG_INFINITY;
        for k in 0..=steps {
            // rounding can push the last sample just past one lap, where it wraps
            let d = (total * f64::from(k) / f64::from(steps)).min(total);
            let sol = solve(curve, &table, d);
            assert!(sol.is_converged());
            assert!(sol.parameter >= previous, "s({d}) = {} < {previous}", sol.parameter);
            previous = sol.parameter;
        }
    }

    #[test]
    fn monotone_in_distance() {
        assert_monotone(&octagon(), 200);
    }

    #[test]
    fn monotone_at_fine_distance_steps() {
        // fine enough to catch a distance accepted on its first guess sitting
        // past a neighbour that needed one more Newton step
        assert_monotone(&octagon(), 200_000);
        assert_monotone(&square(), 100_000);
    }

    #[test]
    fn accepted_estimate_is_polished() {
        // 4.695 on this loop is accepted straight from the linear guess
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let sol = solve(&curve, &table, 4.695_069);
        assert!(sol.is_converged());
        assert!(sol.residual < 1e-3);
        let before = solve(&curve, &table, 4.694_821);
        assert!(sol.parameter >= before.parameter);
    }

    #[test]
    fn square_half_lap_reaches_opposite_corner() {
        let curve = square();
        let table = SegmentLengthTable::compute(&curve).unwrap();

        let half = solve(&curve, &table, table.total_length() / 2.0);
        assert_abs_diff_eq!(half.parameter, 2.0, epsilon = 1e-3);
        assert_relative_eq!(
            curve.position(half.parameter),
            Point3::new(0.0, 0.0, 10.0),
            epsilon = 0.01
        );

        // 20 units of the ~42-unit loop lands just short of that corner
        let twenty = solve(&curve, &table, 20.0);
        assert!(twenty.parameter > 1.8 && twenty.parameter < 2.0);
        let corner_gap = (curve.position(twenty.parameter) - Point3::new(0.0, 0.0, 10.0)).norm();
        assert!(corner_gap < 1.5);
    }

    #[test]
    fn out_of_range_distance_wraps() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let total = table.total_length();

        let inside = solve(&curve, &table, 5.0).parameter;
        assert_abs_diff_eq!(solve(&curve, &table, total + 5.0).parameter, inside, epsilon = 1e-9);
        assert_abs_diff_eq!(solve(&curve, &table, 5.0 - total).parameter, inside, epsilon = 1e-6);
        assert_abs_diff_eq!(
            solve(&curve, &table, 3.0 * total + 5.0).parameter,
            inside,
            epsilon = 1e-6
        );
    }

    #[test]
    fn non_finite_distance_rejected() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let err = ParameterAtDistance::new(f64::NAN)
            .execute(&curve, &table)
            .unwrap_err();
        assert!(matches!(
            err,
            LoopTrackError::Operation(OperationError::InvalidInput(_))
        ));
    }

    #[test]
    fn mismatched_table_rejected() {
        let table = SegmentLengthTable::compute(&square()).unwrap();
        let err = ParameterAtDistance::new(1.0)
            .execute(&octagon(), &table)
            .unwrap_err();
        assert!(matches!(
            err,
            LoopTrackError::Operation(OperationError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_iterations_rejected() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let params = SolverParams {
            max_iterations: 0,
            ..SolverParams::default()
        };
        assert!(ParameterAtDistance::new(1.0)
            .with_params(params)
            .execute(&curve, &table)
            .is_err());
    }

    #[test]
    fn iteration_limit_is_reported() {
        let curve = octagon();
        let table = SegmentLengthTable::compute(&curve).unwrap();
        let params = SolverParams {
            tolerance: 0.0,
            max_iterations: 5,
        };
        let capped = ParameterAtDistance::new(13.0)
            .with_params(params)
            .execute(&curve, &table)
            .unwrap();
        assert_eq!(capped.convergence, Convergence::IterationLimit);
        assert_eq!(capped.iterations, 5);
        assert!(capped.parameter.is_finite());

        let converged = solve(&curve, &table, 13.0);
        assert_abs_diff_eq!(capped.parameter, converged.parameter, epsilon = 0.01);
    }

    #[test]
    fn vanishing_tangent_falls_back_to_bisection() {
        // the window (A, B, A, C) starts segment 0 at B with zero velocity
        let a = Point3::new(0.0, 0.0, 0.0);
        let curve = ClosedCatmullRom::new(vec![
            a,
            Point3::new(4.0, 0.0, 0.0),
            a,
            Point3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_abs_diff_eq!(curve.gradient(0.0).norm(), 0.0);

        let table = SegmentLengthTable::compute(&curve).unwrap();
        let params = SolverParams {
            tolerance: 0.0,
            max_iterations: 100,
        };
        let sol = ParameterAtDistance::new(0.0)
            .with_params(params)
            .execute(&curve, &table)
            .unwrap();
        assert!(sol.parameter.is_finite());
        assert!(sol.residual.is_finite());
        assert!(sol.parameter < 0.05);
    }
}
