//! Centrifugal pump impeller design charts as validated polynomial models.
//!
//! A [`ChartRegistry`] owns the digitized reference curves and lazily fits
//! each chart the first time it is read. Every reading is checked against the
//! region the chart's data actually covers; there is no extrapolation.
//!
//! ```no_run
//! use impeller_charts::{ChartRegistry, SpecificSpeed};
//!
//! let charts = ChartRegistry::lobanoff()?;
//! let ns = SpecificSpeed::us_customary(1800.0);
//!
//! let ku = charts.head_constant().calc(ns, 6)?;
//! let rise = charts.head_rise().calc(ns, 6)?;
//! let k3 = charts.volute_constant().calc(ns)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chart;
mod charts;
mod dataset;
mod error;
mod model;
pub mod plot;
mod registry;
mod settings;
mod units;

pub use chart::{ChartId, ChartInfo, ChartValue, InputKind, OutputUnit};
pub use charts::{CapacityConstant, ChartFit, HeadConstant, HeadRise, VoluteConstant};
pub use dataset::{Dataset, ReferenceData, curve_label};
pub use error::{ChartError, DatasetError};
pub use model::{Model, VaneInput};
pub use registry::{ChartRegistry, VaneFilter};
pub use settings::{FitSettings, RegistrySettings};
pub use units::{SpecificSpeed, SpecificSpeedUnit};

pub use impeller_fit::{CurveRecord, DataError, DomainError, DomainLimits, FitError, NumericalError, VaneRange};
