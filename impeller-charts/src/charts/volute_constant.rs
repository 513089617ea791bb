//! Volute velocity constant K3 = C3 / √(2gH).

use impeller_fit::{CurveRecord, FitError, fit_1d, validate_records};

use crate::{ChartError, ChartFit, ChartId, ChartRegistry, ChartValue, Model, ReferenceData, SpecificSpeed};

/// Fits every sampled point once, whatever vane counts its curve lists.
pub(super) fn fit(records: &[CurveRecord], degree: usize) -> Result<ChartFit, FitError> {
    validate_records(records)?;

    let samples: Vec<(f64, f64)> = records
        .iter()
        .flat_map(|record| record.points.iter().map(|&[speed, k3]| (speed, k3)))
        .collect();

    Ok(ChartFit::Curve(fit_1d(&samples, degree)?))
}

/// Volute constant model. The chart does not depend on vane count.
#[derive(Debug)]
pub struct VoluteConstant<'a, D> {
    registry: &'a ChartRegistry<D>,
}

impl<'a, D: ReferenceData> VoluteConstant<'a, D> {
    pub(crate) fn new(registry: &'a ChartRegistry<D>) -> Self {
        Self { registry }
    }

    /// Reads K3 for a specific speed.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Domain`] outside the chart, or
    /// [`ChartError::Fit`] if the chart data cannot be fitted.
    pub fn calc(&self, specific_speed: SpecificSpeed) -> Result<ChartValue, ChartError> {
        self.registry
            .calc(ChartId::VoluteConstant, specific_speed, None)
    }
}

impl<D: ReferenceData> Model for VoluteConstant<'_, D> {
    type Input = SpecificSpeed;
    type Output = ChartValue;
    type Error = ChartError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calc(*input)
    }
}
