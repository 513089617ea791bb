use impeller_fit::{DataError, DomainError, FitError, NumericalError};
use thiserror::Error;

use crate::ChartId;

/// Errors returned by the chart registry and the chart models.
///
/// Every variant is `Clone` so a failed fit can be cached and replayed to
/// each later caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// The input lies outside the region covered by the chart's data.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The chart's records could not be fitted.
    #[error(transparent)]
    Fit(#[from] FitError),

    /// A chart indexed by vane count was read without one.
    #[error("{chart} needs a vane count")]
    MissingVanes { chart: ChartId },

    /// A chart name did not match any known chart.
    #[error("unknown chart: {name}")]
    UnknownChart { name: String },

    /// A vane step for a fitted family is too small or not finite.
    #[error("vane step {step} must be a finite value of at least {min}")]
    InvalidPlotStep { step: f64, min: f64 },

    /// The fit settings for a chart are out of range.
    #[error("invalid settings for {chart}: {reason}")]
    InvalidSettings { chart: ChartId, reason: &'static str },
}

impl From<DataError> for ChartError {
    fn from(error: DataError) -> Self {
        Self::Fit(error.into())
    }
}

impl From<NumericalError> for ChartError {
    fn from(error: NumericalError) -> Self {
        Self::Fit(error.into())
    }
}

/// Errors raised while loading a reference dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
}
