use thiserror::Error;

/// Top-level error type for looptrack.
#[derive(Debug, Error)]
pub enum LoopTrackError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Sampling(#[from] SamplingError),
}

/// Errors related to curve construction and evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("closed curve needs at least 4 control points, got {count}")]
    InvalidCurve { count: usize },

    #[error("control point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("tangent vanishes at s = {parameter}")]
    DegenerateTangent { parameter: f64 },
}

/// Errors related to curve queries and motion.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to sampling a curve.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("invalid sampling parameters: {0}")]
    InvalidParameters(String),

    #[error("sampling would exceed {limit} samples")]
    LimitExceeded { limit: usize },
}

/// Convenience type alias for results using [`LoopTrackError`].
pub type Result<T> = std::result::Result<T, LoopTrackError>;
