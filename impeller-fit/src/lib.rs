//! Least-squares polynomial fits and validity domains for digitized design charts.
//!
//! A chart is a handful of [`CurveRecord`]s read off a printed figure. This
//! crate turns those records into:
//!
//! - a 1-D polynomial ([`Poly1D`]) or a bivariate surface over vane count and
//!   specific speed ([`Poly2D`]),
//! - the region in which the fit may be evaluated ([`DomainLimits`]),
//!
//! and memoizes both behind a [`FitCache`].

mod cache;
mod domain;
mod error;
mod lstsq;
mod polynomial;
mod record;

pub use cache::FitCache;
pub use domain::{DomainLimits, VaneRange, lower_bound, upper_bound_coeffs, vane_limits};
pub use error::{DataError, DomainError, FitError, NumericalError};
pub use polynomial::{Poly1D, Poly2D, fit_1d, fit_1d_up_to, fit_2d};
pub use record::{CurveRecord, validate_records};
