//! Chart fits and the per-chart models built on them.
//!
//! Each chart reduces its records to one [`ChartFit`]:
//!
//! - head constant: straight lines with a shared slope and an offset that is
//!   a polynomial in vane count,
//! - capacity constant and head rise: a surface over vane count and speed,
//! - volute constant: one curve over speed.

mod capacity_constant;
mod head_constant;
mod head_rise;
mod volute_constant;

pub use capacity_constant::CapacityConstant;
pub use head_constant::HeadConstant;
pub use head_rise::HeadRise;
pub use volute_constant::VoluteConstant;

use impeller_fit::{CurveRecord, FitError, Poly1D, Poly2D, fit_2d, validate_records};
use serde::{Deserialize, Serialize};

use crate::{ChartId, FitSettings};

/// The fitted form of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFit {
    /// `y = offset(vanes) + slope · ns`.
    Lines { offset: Poly1D, slope: f64 },
    /// `y = p(ns)`, independent of vane count.
    Curve(Poly1D),
    /// `y = Σ cᵢⱼ vanesⁱ nsʲ`.
    Surface(Poly2D),
}

impl ChartFit {
    /// Evaluates the fit at a vane count and specific speed.
    ///
    /// [`ChartFit::Curve`] ignores `vanes`.
    #[must_use]
    pub fn eval(&self, vanes: f64, speed: f64) -> f64 {
        match self {
            Self::Lines { offset, slope } => offset.eval(vanes) + slope * speed,
            Self::Curve(curve) => curve.eval(speed),
            Self::Surface(surface) => surface.eval(vanes, speed),
        }
    }
}

/// Fits `records` the way `chart` is modeled.
pub(crate) fn fit(
    chart: ChartId,
    records: &[CurveRecord],
    settings: FitSettings,
) -> Result<ChartFit, FitError> {
    match chart {
        ChartId::HeadConstant => head_constant::fit(records, settings.degree),
        ChartId::CapacityConstant | ChartId::HeadRise => fit_surface(records, settings.degree),
        ChartId::VoluteConstant => volute_constant::fit(records, settings.degree),
    }
}

/// Fits a surface with every point counted once per vane count its curve lists.
fn fit_surface(records: &[CurveRecord], order: usize) -> Result<ChartFit, FitError> {
    validate_records(records)?;

    let samples: Vec<(f64, f64, f64)> = records
        .iter()
        .flat_map(|record| {
            record.vanes.iter().flat_map(move |&vanes| {
                record
                    .points
                    .iter()
                    .map(move |&[speed, value]| (f64::from(vanes), speed, value))
            })
        })
        .collect();

    Ok(ChartFit::Surface(fit_2d(&samples, order)?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use impeller_fit::DataError;

    use super::*;

    #[test]
    fn surface_counts_shared_curves_per_vane() {
        // z = 0.01·v + 0.001·x is exactly representable at order 1.
        let plane = |v: f64, x: f64| 0.01 * v + 0.001 * x;
        let records = vec![
            CurveRecord::new(vec![[100.0, plane(4.0, 100.0)], [200.0, plane(4.0, 200.0)]], vec![4]),
            CurveRecord::new(
                vec![[100.0, plane(6.0, 100.0)], [300.0, plane(6.0, 300.0)]],
                vec![6],
            ),
        ];

        let fit = fit_surface(&records, 1).unwrap();
        assert_relative_eq!(fit.eval(5.0, 250.0), plane(5.0, 250.0), epsilon = 1e-12);
    }

    #[test]
    fn surface_of_one_vane_count_is_rejected() {
        let records = vec![CurveRecord::new(
            vec![[100.0, 1.0], [200.0, 2.0], [300.0, 2.5]],
            vec![5],
        )];
        assert!(matches!(
            fit_surface(&records, 1),
            Err(FitError::Numerical(_))
        ));
        assert_eq!(
            fit_surface(&[], 2),
            Err(FitError::Data(DataError::NoCurves))
        );
    }
}
