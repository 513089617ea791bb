//! The chart registry: reference data, fit settings, and the caches built from them.
//!
//! Fits, domains, and vane ranges are computed on first use and then shared
//! by every caller for the lifetime of the registry. Registries never share
//! caches, so two registries over different data cannot interfere.

use std::sync::Arc;

use impeller_fit::{CurveRecord, DomainLimits, FitCache, VaneRange, vane_limits};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    ChartError, ChartFit, ChartId, ChartValue, Dataset, DatasetError, InputKind, ReferenceData,
    RegistrySettings, SpecificSpeed,
    charts::{self, CapacityConstant, HeadConstant, HeadRise, VoluteConstant},
};

/// Which curves of a chart a vane range is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaneFilter {
    All,
    Droop,
    NoDroop,
}

impl VaneFilter {
    #[must_use]
    pub fn accepts(self, record: &CurveRecord) -> bool {
        match self {
            Self::All => true,
            Self::Droop => record.is_droop(),
            Self::NoDroop => !record.is_droop(),
        }
    }
}

/// Owns a reference dataset and every fit derived from it.
#[derive(Debug)]
pub struct ChartRegistry<D = Dataset> {
    data: D,
    settings: RegistrySettings,
    fits: FitCache<ChartId, ChartFit, ChartError>,
    domains: FitCache<ChartId, DomainLimits, ChartError>,
    vane_ranges: FitCache<(ChartId, VaneFilter), VaneRange, ChartError>,
}

impl ChartRegistry<Dataset> {
    /// A registry over the bundled Lobanoff charts with default settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the bundled data cannot be parsed.
    pub fn lobanoff() -> Result<Self, DatasetError> {
        Ok(Self::new(Dataset::lobanoff()?))
    }
}

impl<D: ReferenceData> ChartRegistry<D> {
    /// Creates a registry with the default fit settings.
    #[must_use]
    pub fn new(data: D) -> Self {
        Self {
            data,
            settings: RegistrySettings::default(),
            fits: FitCache::new(),
            domains: FitCache::new(),
            vane_ranges: FitCache::new(),
        }
    }

    /// Creates a registry with custom fit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidSettings`] if `settings` fail validation.
    pub fn with_settings(data: D, settings: RegistrySettings) -> Result<Self, ChartError> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::new(data)
        })
    }

    #[must_use]
    pub fn data(&self) -> &D {
        &self.data
    }

    #[must_use]
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    /// The records of `chart` exactly as the data provider supplied them.
    #[must_use]
    pub fn raw_curves(&self, chart: ChartId) -> &[CurveRecord] {
        self.data.curves(chart)
    }

    /// The fit of `chart`, computed on first access.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Fit`] if the records cannot be fitted. The same
    /// error is returned on every later call.
    pub fn coefficients(&self, chart: ChartId) -> Result<Arc<ChartFit>, ChartError> {
        self.fits.get_or_compute(chart, || {
            charts::fit(chart, self.raw_curves(chart), self.settings.get(chart)).map_err(Into::into)
        })
    }

    /// The validity domain of `chart`, computed on first access.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Fit`] if the records are malformed or the upper
    /// bound cannot be fitted.
    pub fn domain(&self, chart: ChartId) -> Result<Arc<DomainLimits>, ChartError> {
        self.domains.get_or_compute(chart, || {
            let upper_degree = self.settings.get(chart).upper_bound_degree;
            DomainLimits::from_records(self.raw_curves(chart), upper_degree).map_err(Into::into)
        })
    }

    /// The vane range of the curves of `chart` accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::Fit`] if the records are malformed or no curve
    /// passes the filter.
    pub fn vane_limits(&self, chart: ChartId, filter: VaneFilter) -> Result<VaneRange, ChartError> {
        let range = self.vane_ranges.get_or_compute((chart, filter), || {
            vane_limits(self.raw_curves(chart), |record| filter.accepts(record)).map_err(Into::into)
        })?;
        Ok(*range)
    }

    /// Reads `chart` at a specific speed and, for vane-indexed charts, a vane count.
    ///
    /// The speed is converted to the US customary convention and checked
    /// against the chart's domain before the fit is evaluated. Charts that do
    /// not depend on vane count ignore `vanes`.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::MissingVanes`] if a vane-indexed chart is read
    /// without a vane count, [`ChartError::Domain`] if the input lies outside
    /// the chart, or [`ChartError::Fit`] if the chart cannot be fitted.
    pub fn calc(
        &self,
        chart: ChartId,
        specific_speed: SpecificSpeed,
        vanes: Option<u32>,
    ) -> Result<ChartValue, ChartError> {
        let info = chart.info();
        let vanes = match info.input {
            InputKind::Speed => None,
            InputKind::SpeedAndVanes => Some(vanes.ok_or(ChartError::MissingVanes { chart })?),
        };

        let speed = specific_speed.to_us_customary();
        trace!(%chart, speed, ?vanes, "reading chart");
        self.domain(chart)?.check(speed, vanes)?;

        let fit = self.coefficients(chart)?;
        let value = fit.eval(vanes.map_or(0.0, f64::from), speed);
        Ok(ChartValue::new(value, info.output))
    }

    #[must_use]
    pub fn head_constant(&self) -> HeadConstant<'_, D> {
        HeadConstant::new(self)
    }

    #[must_use]
    pub fn capacity_constant(&self) -> CapacityConstant<'_, D> {
        CapacityConstant::new(self)
    }

    #[must_use]
    pub fn head_rise(&self) -> HeadRise<'_, D> {
        HeadRise::new(self)
    }

    #[must_use]
    pub fn volute_constant(&self) -> VoluteConstant<'_, D> {
        VoluteConstant::new(self)
    }
}

#[cfg(test)]
mod tests {
    use impeller_fit::{DataError, DomainError, FitError};

    use super::*;
    use crate::FitSettings;

    fn volute_only() -> Dataset {
        Dataset::new().with_chart(
            ChartId::VoluteConstant,
            vec![CurveRecord::new(
                vec![[400.0, 0.6], [1000.0, 0.42], [2200.0, 0.27], [3400.0, 0.19]],
                vec![5, 6, 7],
            )],
        )
    }

    #[test]
    fn missing_chart_is_a_cached_data_error() {
        let registry = ChartRegistry::new(volute_only());
        let expected = Err(ChartError::Fit(FitError::Data(DataError::NoCurves)));

        assert_eq!(registry.coefficients(ChartId::HeadRise).map(|_| ()), expected);
        assert_eq!(registry.coefficients(ChartId::HeadRise).map(|_| ()), expected);
        assert_eq!(registry.domain(ChartId::HeadRise).map(|_| ()), expected);
    }

    #[test]
    fn vane_charts_require_vanes() {
        let registry = ChartRegistry::new(volute_only());
        assert_eq!(
            registry.calc(ChartId::HeadRise, SpecificSpeed::us_customary(1000.0), None),
            Err(ChartError::MissingVanes {
                chart: ChartId::HeadRise
            })
        );
    }

    #[test]
    fn volute_ignores_vanes() {
        let registry = ChartRegistry::new(volute_only());
        let ns = SpecificSpeed::us_customary(1500.0);
        let plain = registry.calc(ChartId::VoluteConstant, ns, None).unwrap();
        let with_vanes = registry.calc(ChartId::VoluteConstant, ns, Some(12)).unwrap();
        assert_eq!(plain, with_vanes);
    }

    #[test]
    fn domain_is_checked_before_evaluating() {
        let registry = ChartRegistry::new(volute_only());
        let result = registry.volute_constant().calc(SpecificSpeed::us_customary(300.0));
        assert_eq!(
            result,
            Err(ChartError::Domain(DomainError::SpeedBelowRange {
                speed: 300.0,
                lower: 400.0
            }))
        );
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = RegistrySettings {
            volute_constant: FitSettings::new(9, 0),
            ..RegistrySettings::default()
        };
        assert!(matches!(
            ChartRegistry::with_settings(volute_only(), settings),
            Err(ChartError::InvalidSettings {
                chart: ChartId::VoluteConstant,
                ..
            })
        ));
    }

    #[test]
    fn settings_change_the_fit() {
        let settings = RegistrySettings {
            volute_constant: FitSettings::new(1, 0),
            ..RegistrySettings::default()
        };
        let registry = ChartRegistry::with_settings(volute_only(), settings).unwrap();
        let fit = registry.coefficients(ChartId::VoluteConstant).unwrap();
        assert!(matches!(&*fit, ChartFit::Curve(line) if line.degree() == 1));
    }
}
