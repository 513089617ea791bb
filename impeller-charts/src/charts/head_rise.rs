//! Percent head rise from best efficiency to shutoff.
//!
//! Curves on this chart are flagged as drooping or not. The fit ignores the
//! flag, but the vane range of each family can be queried on its own.

use crate::{
    ChartError, ChartId, ChartRegistry, ChartValue, Model, ReferenceData, SpecificSpeed, VaneFilter,
    VaneInput,
};

/// Head rise model, returning a percentage.
#[derive(Debug)]
pub struct HeadRise<'a, D> {
    registry: &'a ChartRegistry<D>,
}

impl<'a, D: ReferenceData> HeadRise<'a, D> {
    pub(crate) fn new(registry: &'a ChartRegistry<D>) -> Self {
        Self { registry }
    }

    /// Reads the percent head rise for a specific speed and vane count.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Domain`] outside the chart, or
    /// [`ChartError::Fit`] if the chart data cannot be fitted.
    pub fn calc(&self, specific_speed: SpecificSpeed, vanes: u32) -> Result<ChartValue, ChartError> {
        self.registry
            .calc(ChartId::HeadRise, specific_speed, Some(vanes))
    }

    /// Returns `true` if `vanes` lies within the vane range of the drooping curves.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Fit`] if the records are malformed or none droop.
    pub fn droops(&self, vanes: u32) -> Result<bool, ChartError> {
        let range = self.registry.vane_limits(ChartId::HeadRise, VaneFilter::Droop)?;
        Ok(range.contains(vanes))
    }
}

impl<D: ReferenceData> Model for HeadRise<'_, D> {
    type Input = VaneInput;
    type Output = ChartValue;
    type Error = ChartError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calc(input.specific_speed, input.vanes)
    }
}
