//! Capacity constant Km2, an order-2 surface over vane count and specific speed.

use crate::{
    ChartError, ChartId, ChartRegistry, ChartValue, Model, ReferenceData, SpecificSpeed, VaneInput,
};

/// Capacity constant model.
#[derive(Debug)]
pub struct CapacityConstant<'a, D> {
    registry: &'a ChartRegistry<D>,
}

impl<'a, D: ReferenceData> CapacityConstant<'a, D> {
    pub(crate) fn new(registry: &'a ChartRegistry<D>) -> Self {
        Self { registry }
    }

    /// Reads Km2 for a specific speed and vane count.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Domain`] outside the chart, or
    /// [`ChartError::Fit`] if the chart data cannot be fitted.
    pub fn calc(&self, specific_speed: SpecificSpeed, vanes: u32) -> Result<ChartValue, ChartError> {
        self.registry
            .calc(ChartId::CapacityConstant, specific_speed, Some(vanes))
    }
}

impl<D: ReferenceData> Model for CapacityConstant<'_, D> {
    type Input = VaneInput;
    type Output = ChartValue;
    type Error = ChartError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calc(input.specific_speed, input.vanes)
    }
}
