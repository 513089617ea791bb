use thiserror::Error;

/// Errors raised when a chart's reference records cannot support a fit.
///
/// These are detected the first time a fit is requested, never at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DataError {
    /// The chart has no curve records at all.
    #[error("chart has no curve records")]
    NoCurves,

    /// No curve record matched the requested filter.
    #[error("no curve records match the requested filter")]
    NoMatchingCurves,

    /// A curve has no sample points.
    #[error("curve {curve} has no points")]
    EmptyPoints { curve: usize },

    /// A curve does not name any vane count.
    #[error("curve {curve} has an empty vane list")]
    EmptyVanes { curve: usize },

    /// A curve lists a vane count of zero.
    #[error("curve {curve} lists a vane count of zero")]
    ZeroVanes { curve: usize },

    /// A sample point is NaN or infinite.
    #[error("curve {curve} has a non-finite value at point {point}")]
    NonFinitePoint { curve: usize, point: usize },

    /// Specific speed decreases between two consecutive points.
    #[error("curve {curve} has decreasing specific speed at point {point}")]
    DecreasingSpeed { curve: usize, point: usize },

    /// A flattened fit sample is NaN or infinite.
    #[error("fit sample {index} is not finite")]
    NonFiniteSample { index: usize },

    /// A curve has fewer points than the chart model needs.
    #[error("curve {curve} has {points} points, at least {required} are required")]
    TooFewPoints {
        curve: usize,
        points: usize,
        required: usize,
    },

    /// A straight segment has zero width, so its slope is undefined.
    #[error("curve {curve} starts with a zero-width segment")]
    DegenerateSegment { curve: usize },

    /// There are fewer distinct samples than polynomial coefficients.
    ///
    /// The least-squares system would be underdetermined, so no unique fit exists.
    #[error("{distinct} distinct samples cannot determine {required} coefficients")]
    InsufficientSamples { distinct: usize, required: usize },
}

/// Errors raised by the least-squares solve itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NumericalError {
    /// The design matrix is rank-deficient or too ill-conditioned to trust.
    #[error("design matrix has numerical rank {rank} of {columns} columns")]
    RankDeficient { rank: usize, columns: usize },

    /// The solve produced NaN or infinite coefficients.
    #[error("least-squares solution is not finite")]
    NonFiniteSolution,
}

/// Any failure while fitting a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Numerical(#[from] NumericalError),
}

/// An input falls outside the region covered by the chart's data.
///
/// There is no extrapolation fallback; callers must treat this as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum DomainError {
    #[error("specific speed is not a finite number: {speed}")]
    NonFiniteInput { speed: f64 },

    #[error("specific speed {speed} is below the chart minimum of {lower}")]
    SpeedBelowRange { speed: f64, lower: f64 },

    #[error("specific speed {speed} is above the chart maximum of {upper}")]
    SpeedAboveRange { speed: f64, upper: f64 },

    #[error("{vanes} vanes is outside the chart range {min}..={max}")]
    VanesOutOfRange { vanes: u32, min: u32, max: u32 },
}
