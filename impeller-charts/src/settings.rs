use serde::{Deserialize, Serialize};

use crate::{ChartError, ChartId};

const MAX_DEGREE: usize = 6;
const MAX_UPPER_BOUND_DEGREE: usize = 2;

/// Polynomial degrees used to fit one chart.
///
/// `degree` means different things per chart: the speed degree of the volute
/// curve, the total order of the capacity and head-rise surfaces, and the
/// vane-count degree of the head-constant offset. Polynomials over vane count
/// are capped at one less than the number of distinct vane counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitSettings {
    pub degree: usize,
    pub upper_bound_degree: usize,
}

impl FitSettings {
    #[must_use]
    pub fn new(degree: usize, upper_bound_degree: usize) -> Self {
        Self {
            degree,
            upper_bound_degree,
        }
    }

    /// Validates that both degrees are in a range the charts can support.
    ///
    /// # Errors
    ///
    /// Returns an error if either degree is too high.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.degree > MAX_DEGREE {
            return Err("degree must be at most 6");
        }
        if self.upper_bound_degree > MAX_UPPER_BOUND_DEGREE {
            return Err("upper_bound_degree must be at most 2");
        }
        Ok(())
    }
}

/// Fit settings for every chart of a registry.
///
/// Missing fields deserialize to the chart defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub head_constant: FitSettings,
    pub capacity_constant: FitSettings,
    pub head_rise: FitSettings,
    pub volute_constant: FitSettings,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            head_constant: FitSettings::new(2, 1),
            capacity_constant: FitSettings::new(2, 1),
            head_rise: FitSettings::new(3, 2),
            volute_constant: FitSettings::new(3, 0),
        }
    }
}

impl RegistrySettings {
    #[must_use]
    pub fn get(&self, chart: ChartId) -> FitSettings {
        match chart {
            ChartId::HeadConstant => self.head_constant,
            ChartId::CapacityConstant => self.capacity_constant,
            ChartId::HeadRise => self.head_rise,
            ChartId::VoluteConstant => self.volute_constant,
        }
    }

    /// # Errors
    ///
    /// Returns [`ChartError::InvalidSettings`] naming the first invalid chart.
    pub fn validate(&self) -> Result<(), ChartError> {
        ChartId::ALL.into_iter().try_for_each(|chart| {
            self.get(chart)
                .validate()
                .map_err(|reason| ChartError::InvalidSettings { chart, reason })
        })
    }
}
