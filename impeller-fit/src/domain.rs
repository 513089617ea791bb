//! Validity domains derived from the raw chart records.
//!
//! A fitted polynomial is only trusted where the chart had data. The domain
//! is tracked independently of the fit coefficients:
//!
//! - the lower speed bound is the largest of the curves' smallest speeds, so a
//!   short curve tightens the floor for every vane count,
//! - the upper speed bound is a low-degree polynomial in vane count fitted to
//!   each curve's last sampled speed,
//! - the vane range is the span of vane counts named by any curve.

use serde::{Deserialize, Serialize};

use crate::{CurveRecord, DataError, DomainError, FitError, Poly1D, fit_1d_up_to, validate_records};

/// Relative slack on the fitted upper bound.
///
/// A least-squares bound through samples that share one maximum speed can
/// land a few ulps below it, which would reject the chart's own last point.
const UPPER_BOUND_TOLERANCE: f64 = 1e-12;

/// Inclusive range of vane counts covered by a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VaneRange {
    pub min: u32,
    pub max: u32,
}

impl VaneRange {
    #[must_use]
    pub fn contains(&self, vanes: u32) -> bool {
        (self.min..=self.max).contains(&vanes)
    }

    /// Returns `true` if `other` lies entirely inside this range.
    #[must_use]
    pub fn covers(&self, other: &VaneRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }
}

/// Minimum and maximum vane count over the records accepted by `filter`.
///
/// # Errors
///
/// Returns a [`DataError`] if the records are malformed, or
/// [`DataError::NoMatchingCurves`] if `filter` rejects every record.
pub fn vane_limits<F>(records: &[CurveRecord], filter: F) -> Result<VaneRange, DataError>
where
    F: Fn(&CurveRecord) -> bool,
{
    validate_records(records)?;

    let mut vanes = records
        .iter()
        .filter(|&record| filter(record))
        .flat_map(|record| record.vanes.iter().copied());

    let first = vanes.next().ok_or(DataError::NoMatchingCurves)?;
    let (min, max) = vanes.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Ok(VaneRange { min, max })
}

/// The largest of the curves' smallest sampled speeds.
///
/// # Errors
///
/// Returns a [`DataError`] if the records are malformed.
pub fn lower_bound(records: &[CurveRecord]) -> Result<f64, DataError> {
    validate_records(records)?;
    Ok(records
        .iter()
        .filter_map(CurveRecord::min_speed)
        .fold(f64::NEG_INFINITY, f64::max))
}

/// Polynomial in vane count giving the highest trusted specific speed.
///
/// Each curve contributes its last sampled speed once per vane count it lists.
/// The degree is capped by the number of distinct vane counts, so a chart
/// with a single vane count yields a constant bound.
///
/// # Errors
///
/// Returns a [`FitError`] if the records are malformed or the fit fails.
pub fn upper_bound_coeffs(records: &[CurveRecord], max_degree: usize) -> Result<Poly1D, FitError> {
    validate_records(records)?;

    let samples: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|record| {
            let top = record.max_speed()?;
            Some(record.vanes.iter().map(move |&v| (f64::from(v), top)))
        })
        .flatten()
        .collect();

    fit_1d_up_to(&samples, max_degree)
}

/// Where a chart's fit may be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainLimits {
    lower: f64,
    upper: Poly1D,
    vanes: VaneRange,
}

impl DomainLimits {
    /// Derives the domain of a chart from its records.
    ///
    /// # Errors
    ///
    /// Returns a [`FitError`] if the records are malformed or the upper
    /// bound cannot be fitted.
    pub fn from_records(records: &[CurveRecord], upper_degree: usize) -> Result<Self, FitError> {
        Ok(Self {
            lower: lower_bound(records)?,
            upper: upper_bound_coeffs(records, upper_degree)?,
            vanes: vane_limits(records, |_| true)?,
        })
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower
    }

    /// Upper speed bound polynomial, coefficients over vane count.
    #[must_use]
    pub fn upper_bound_coeffs(&self) -> &Poly1D {
        &self.upper
    }

    /// Highest trusted specific speed for `vanes`.
    #[must_use]
    pub fn upper_bound(&self, vanes: f64) -> f64 {
        self.upper.eval(vanes)
    }

    /// Highest speed trusted for every vane count in the chart.
    ///
    /// Used by charts whose value does not depend on vane count.
    #[must_use]
    pub fn upper_bound_any(&self) -> f64 {
        self.upper_bound(f64::from(self.vanes.min))
            .min(self.upper_bound(f64::from(self.vanes.max)))
    }

    #[must_use]
    pub fn vane_range(&self) -> VaneRange {
        self.vanes
    }

    /// Checks that `speed` (and `vanes`, when the chart uses it) lies inside the domain.
    ///
    /// Both speed bounds are inclusive. The upper bound is a fitted
    /// polynomial, so it is compared with a relative slack of `1e-12`.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] describing the first violated bound.
    pub fn check(&self, speed: f64, vanes: Option<u32>) -> Result<(), DomainError> {
        if !speed.is_finite() {
            return Err(DomainError::NonFiniteInput { speed });
        }

        let upper = match vanes {
            Some(v) if !self.vanes.contains(v) => {
                return Err(DomainError::VanesOutOfRange {
                    vanes: v,
                    min: self.vanes.min,
                    max: self.vanes.max,
                });
            }
            Some(v) => self.upper_bound(f64::from(v)),
            None => self.upper_bound_any(),
        };

        if speed < self.lower {
            return Err(DomainError::SpeedBelowRange {
                speed,
                lower: self.lower,
            });
        }
        if speed > upper + upper.abs() * UPPER_BOUND_TOLERANCE {
            return Err(DomainError::SpeedAboveRange { speed, upper });
        }
        Ok(())
    }
}
