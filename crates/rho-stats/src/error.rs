/// Errors from statistics routines.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum StatsError {
    /// The input vector holds no elements.
    #[error("empty vector")]
    EmptyVector,

    /// The routine needs more elements than were supplied.
    #[error("need at least {needed} elements, got {actual}")]
    TooFewElements { needed: usize, actual: usize },

    /// Paired inputs have different lengths.
    #[error("vectors have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// The delta degrees of freedom leave a non-positive denominator.
    #[error("ddof {ddof} leaves no degrees of freedom for {n} elements")]
    InvalidDdof { ddof: usize, n: usize },

    /// A quantile outside the unit interval was requested.
    #[error("quantile {0} is outside [0, 1]")]
    InvalidQuantile(f64),

    /// Correlation is undefined when either input has zero spread.
    #[error("standard deviation is zero")]
    ZeroStdDev,
}

/// Result alias for statistics routines.
pub type StatsResult<T> = std::result::Result<T, StatsError>;
