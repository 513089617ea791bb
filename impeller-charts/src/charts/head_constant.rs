//! Head constant Ku.
//!
//! The chart is a family of straight lines, one per vane count. All lines
//! share one slope, the mean of each curve's first-segment slope. Each curve
//! then gives an offset at zero specific speed, and the offsets are fitted
//! against vane count.

use impeller_fit::{CurveRecord, DataError, FitError, fit_1d_up_to, validate_records};

use crate::{
    ChartError, ChartFit, ChartId, ChartRegistry, ChartValue, Model, ReferenceData, SpecificSpeed,
    VaneInput,
};

pub(super) fn fit(records: &[CurveRecord], offset_degree: usize) -> Result<ChartFit, FitError> {
    validate_records(records)?;

    let mut slope_sum = 0.0;
    for (curve, record) in records.iter().enumerate() {
        let (first, second) = match record.points.as_slice() {
            [first, second, ..] => (first, second),
            points => {
                return Err(DataError::TooFewPoints {
                    curve,
                    points: points.len(),
                    required: 2,
                }
                .into());
            }
        };

        let run = second[0] - first[0];
        if run == 0.0 {
            return Err(DataError::DegenerateSegment { curve }.into());
        }
        slope_sum += (second[1] - first[1]) / run;
    }
    let slope = slope_sum / records.len() as f64;

    let offsets: Vec<(f64, f64)> = records
        .iter()
        .flat_map(|record| {
            let [x0, y0] = record.points[0];
            let offset = y0 - slope * x0;
            record.vanes.iter().map(move |&v| (f64::from(v), offset))
        })
        .collect();

    Ok(ChartFit::Lines {
        offset: fit_1d_up_to(&offsets, offset_degree)?,
        slope,
    })
}

/// Head constant model, `Ku = offset(vanes) + slope · Ns`.
#[derive(Debug)]
pub struct HeadConstant<'a, D> {
    registry: &'a ChartRegistry<D>,
}

impl<'a, D: ReferenceData> HeadConstant<'a, D> {
    pub(crate) fn new(registry: &'a ChartRegistry<D>) -> Self {
        Self { registry }
    }

    /// Reads Ku for a specific speed and vane count.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Domain`] outside the chart, or
    /// [`ChartError::Fit`] if the chart data cannot be fitted.
    pub fn calc(&self, specific_speed: SpecificSpeed, vanes: u32) -> Result<ChartValue, ChartError> {
        self.registry
            .calc(ChartId::HeadConstant, specific_speed, Some(vanes))
    }
}

impl<D: ReferenceData> Model for HeadConstant<'_, D> {
    type Input = VaneInput;
    type Output = ChartValue;
    type Error = ChartError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calc(input.specific_speed, input.vanes)
    }
}
