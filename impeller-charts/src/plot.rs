//! Data series for comparing fits against the raw chart curves.
//!
//! Nothing here renders. Each function returns labeled polylines that a
//! plotting front end can draw as is.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartId, ChartRegistry, InputKind, ReferenceData, curve_label};

/// Smallest vane step accepted by [`fitted_family`].
pub const MIN_VANE_STEP: f64 = 0.01;

/// A labeled polyline of `[x, y]` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

/// The raw curves of `chart`, one series per record.
#[must_use]
pub fn raw_series<D: ReferenceData>(registry: &ChartRegistry<D>, chart: ChartId) -> Vec<Series> {
    registry
        .raw_curves(chart)
        .iter()
        .map(|record| Series {
            label: curve_label(record),
            points: record.points.clone(),
        })
        .collect()
}

/// The fitted curve for `vanes`, sampled at `samples` speeds from the lower
/// bound to the upper bound.
///
/// `vanes` may be fractional. Charts that ignore vane count use the speed
/// range valid for every vane count.
///
/// # Errors
///
/// Returns [`ChartError::Fit`] if the chart cannot be fitted.
pub fn fitted_series<D: ReferenceData>(
    registry: &ChartRegistry<D>,
    chart: ChartId,
    vanes: f64,
    samples: usize,
) -> Result<Series, ChartError> {
    let domain = registry.domain(chart)?;
    let fit = registry.coefficients(chart)?;

    let (label, upper) = match chart.info().input {
        InputKind::Speed => ("fit".to_string(), domain.upper_bound_any()),
        InputKind::SpeedAndVanes => (format!("{vanes} vanes"), domain.upper_bound(vanes)),
    };

    let points = Array1::linspace(domain.lower_bound(), upper, samples)
        .iter()
        .map(|&speed| [speed, fit.eval(vanes, speed)])
        .collect();

    Ok(Series { label, points })
}

/// Fitted curves for every vane count in range, stepping by `step` vanes.
///
/// A `step` of `0.5` also draws the half counts between charted curves.
///
/// # Errors
///
/// Returns [`ChartError::InvalidPlotStep`] if `step` is below
/// [`MIN_VANE_STEP`] or not finite, or [`ChartError::Fit`] if the chart
/// cannot be fitted.
pub fn fitted_family<D: ReferenceData>(
    registry: &ChartRegistry<D>,
    chart: ChartId,
    step: f64,
    samples: usize,
) -> Result<Vec<Series>, ChartError> {
    if !step.is_finite() || step < MIN_VANE_STEP {
        return Err(ChartError::InvalidPlotStep {
            step,
            min: MIN_VANE_STEP,
        });
    }

    let range = registry.domain(chart)?.vane_range();
    if chart.info().input == InputKind::Speed {
        return Ok(vec![fitted_series(
            registry,
            chart,
            f64::from(range.min),
            samples,
        )?]);
    }

    let (min, max) = (f64::from(range.min), f64::from(range.max));
    let count = ((max - min) / step).floor() as usize + 1;

    (0..count)
        .map(|i| fitted_series(registry, chart, min + i as f64 * step, samples))
        .collect()
}

/// The edge of the charted data: `(upper(v), f(v, upper(v)))` across the vane range.
///
/// # Errors
///
/// Returns [`ChartError::Fit`] if the chart cannot be fitted.
pub fn limit_series<D: ReferenceData>(
    registry: &ChartRegistry<D>,
    chart: ChartId,
    samples: usize,
) -> Result<Series, ChartError> {
    let domain = registry.domain(chart)?;
    let fit = registry.coefficients(chart)?;
    let range = domain.vane_range();

    let points = Array1::linspace(f64::from(range.min), f64::from(range.max), samples)
        .iter()
        .map(|&vanes| {
            let speed = domain.upper_bound(vanes);
            [speed, fit.eval(vanes, speed)]
        })
        .collect();

    Ok(Series {
        label: "limit of data".to_string(),
        points,
    })
}
