mod arc_length;
mod distance_at_parameter;
mod parameter_at_distance;
mod point_at_distance;
mod segment_lengths;

pub use arc_length::ArcLength;
pub use distance_at_parameter::DistanceAtParameter;
pub use parameter_at_distance::{Convergence, DistanceSolution, ParameterAtDistance, SolverParams};
pub use point_at_distance::PointAtDistance;
pub use segment_lengths::SegmentLengthTable;
