//! Polynomial models and their least-squares fits.
//!
//! Two shapes are supported:
//!
//! - [`Poly1D`]: `y = c₀xⁿ + c₁xⁿ⁻¹ + … + cₙ`, coefficients stored from the
//!   highest degree down, the same order a printed chart correlation uses.
//! - [`Poly2D`]: `z = Σ cᵢⱼ vⁱ xʲ` over all monomials with `i + j ≤ order`,
//!   where `v` is the vane count and `x` the specific speed.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DataError, FitError, lstsq::solve_least_squares};

/// A univariate polynomial with coefficients ordered from highest degree to lowest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poly1D {
    coefficients: Vec<f64>,
}

impl Poly1D {
    /// Creates a polynomial from coefficients ordered highest degree first.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `x` using Horner's scheme.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// A bivariate polynomial in vane count `v` and specific speed `x`.
///
/// Coefficient `[i, j]` multiplies `vⁱ xʲ`. Entries with `i + j > order` are
/// always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poly2D {
    order: usize,
    coefficients: Array2<f64>,
}

impl Poly2D {
    /// Total degree of the surface.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The full `(order + 1) × (order + 1)` coefficient grid.
    #[must_use]
    pub fn coefficients(&self) -> &Array2<f64> {
        &self.coefficients
    }

    /// Coefficient of `v^vane_degree · x^speed_degree`, zero outside the grid.
    #[must_use]
    pub fn coefficient(&self, vane_degree: usize, speed_degree: usize) -> f64 {
        self.coefficients
            .get([vane_degree, speed_degree])
            .copied()
            .unwrap_or(0.0)
    }

    /// Evaluates the surface at vane count `vanes` and specific speed `x`.
    #[must_use]
    pub fn eval(&self, vanes: f64, x: f64) -> f64 {
        self.coefficients
            .rows()
            .into_iter()
            .rev()
            .fold(0.0, |acc, row| {
                let in_speed = row.iter().rev().fold(0.0, |inner, &c| inner * x + c);
                acc * vanes + in_speed
            })
    }
}

/// Monomial exponents `(i, j)` with `i + j <= order`, vane degree major.
fn monomials(order: usize) -> Vec<(usize, usize)> {
    (0..=order)
        .flat_map(|i| (0..=order - i).map(move |j| (i, j)))
        .collect()
}

fn count_distinct<T, F>(mut keys: Vec<T>, same: F) -> usize
where
    F: Fn(&T, &T) -> bool,
    T: Copy,
{
    keys.dedup_by(|a, b| same(a, b));
    keys.len()
}

fn distinct_speeds(samples: &[(f64, f64)]) -> usize {
    let mut xs: Vec<f64> = samples.iter().map(|&(x, _)| x).collect();
    xs.sort_by(f64::total_cmp);
    count_distinct(xs, |a, b| a == b)
}

fn check_finite_1d(samples: &[(f64, f64)]) -> Result<(), DataError> {
    match samples
        .iter()
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        Some(index) => Err(DataError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

/// Fits a polynomial of exactly `degree` to `(x, y)` samples by least squares.
///
/// Repeated samples are kept: a point that appears twice weighs twice.
///
/// # Errors
///
/// Returns [`DataError::NonFiniteSample`] for NaN or infinite samples,
/// [`DataError::InsufficientSamples`] if there are fewer distinct `x` values
/// than `degree + 1`, or a [`NumericalError`](crate::NumericalError) if the
/// solve is rank-deficient.
pub fn fit_1d(samples: &[(f64, f64)], degree: usize) -> Result<Poly1D, FitError> {
    check_finite_1d(samples)?;

    let required = degree + 1;
    let distinct = distinct_speeds(samples);
    if distinct < required {
        return Err(DataError::InsufficientSamples { distinct, required }.into());
    }

    // Closed form keeps a constant fit of identical values exact.
    if degree == 0 {
        let mean = samples.iter().map(|&(_, y)| y).sum::<f64>() / samples.len() as f64;
        return Ok(Poly1D::constant(mean));
    }

    let design = Array2::from_shape_fn((samples.len(), required), |(row, col)| {
        samples[row].0.powi((degree - col) as i32)
    });
    let values = Array1::from_iter(samples.iter().map(|&(_, y)| y));

    let beta = solve_least_squares(&design, &values)?;
    Ok(Poly1D::new(beta.to_vec()))
}

/// Fits the highest degree up to `max_degree` that the samples determine.
///
/// The effective degree is `min(max_degree, distinct - 1)`, logged at debug
/// level whenever it is lower than `max_degree`. Used for polynomials over
/// vane count, where a chart often shows only a few vane counts: two
/// distinct counts support a line, one a constant.
///
/// # Errors
///
/// Returns [`DataError::InsufficientSamples`] if `samples` is empty, and
/// otherwise the same errors as [`fit_1d`].
pub fn fit_1d_up_to(samples: &[(f64, f64)], max_degree: usize) -> Result<Poly1D, FitError> {
    check_finite_1d(samples)?;
    let distinct = distinct_speeds(samples);
    if distinct == 0 {
        return Err(DataError::InsufficientSamples {
            distinct,
            required: 1,
        }
        .into());
    }
    let degree = max_degree.min(distinct - 1);
    if degree < max_degree {
        debug!(
            configured = max_degree,
            effective = degree,
            distinct,
            "capping polynomial degree to the distinct samples"
        );
    }
    fit_1d(samples, degree)
}

/// Fits a total-degree `order` surface to `(vanes, x, z)` samples.
///
/// # Errors
///
/// Returns [`DataError::NonFiniteSample`] for NaN or infinite samples,
/// [`DataError::InsufficientSamples`] if there are fewer distinct `(vanes, x)`
/// pairs than monomials, or [`NumericalError::RankDeficient`](crate::NumericalError)
/// when the pairs do not pin down every monomial (for example, a single vane count).
pub fn fit_2d(samples: &[(f64, f64, f64)], order: usize) -> Result<Poly2D, FitError> {
    if let Some(index) = samples
        .iter()
        .position(|(v, x, z)| !v.is_finite() || !x.is_finite() || !z.is_finite())
    {
        return Err(DataError::NonFiniteSample { index }.into());
    }

    let terms = monomials(order);
    let required = terms.len();

    let mut pairs: Vec<(f64, f64)> = samples.iter().map(|&(v, x, _)| (v, x)).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    let distinct = count_distinct(pairs, |a, b| a == b);
    if distinct < required {
        return Err(DataError::InsufficientSamples { distinct, required }.into());
    }

    let design = Array2::from_shape_fn((samples.len(), required), |(row, col)| {
        let (v, x, _) = samples[row];
        let (i, j) = terms[col];
        v.powi(i as i32) * x.powi(j as i32)
    });
    let values = Array1::from_iter(samples.iter().map(|&(_, _, z)| z));

    let beta = solve_least_squares(&design, &values)?;

    let mut coefficients = Array2::zeros((order + 1, order + 1));
    for (&(i, j), &c) in terms.iter().zip(beta.iter()) {
        coefficients[[i, j]] = c;
    }

    Ok(Poly2D {
        order,
        coefficients,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::NumericalError;

    #[test]
    fn poly1d_evaluates_highest_degree_first() {
        // 2x² - 3x + 1
        let p = Poly1D::new(vec![2.0, -3.0, 1.0]);
        assert_eq!(p.degree(), 2);
        assert_relative_eq!(p.eval(0.0), 1.0);
        assert_relative_eq!(p.eval(2.0), 3.0);
        assert_relative_eq!(p.eval(-1.0), 6.0);
    }

    #[test]
    fn fit_1d_recovers_cubic() {
        let truth = Poly1D::new(vec![-2.0e-11, 1.5e-7, -4.0e-4, 0.65]);
        let samples: Vec<(f64, f64)> = (0..10)
            .map(|i| 400.0 + 300.0 * f64::from(i))
            .map(|x| (x, truth.eval(x)))
            .collect();

        let fit = fit_1d(&samples, 3).unwrap();
        for (&a, &b) in fit.coefficients().iter().zip(truth.coefficients()) {
            assert_relative_eq!(a, b, max_relative = 1e-6);
        }
    }

    #[test]
    fn fit_1d_degree_zero_is_exact_mean() {
        let fit = fit_1d(&[(5.0, 3400.0), (7.0, 3400.0), (9.0, 3400.0)], 0).unwrap();
        assert_eq!(fit.coefficients(), &[3400.0]);
    }

    #[test]
    fn fit_1d_rejects_underdetermined() {
        let samples = [(1.0, 2.0), (1.0, 2.5), (3.0, 4.0)];
        assert_eq!(
            fit_1d(&samples, 2),
            Err(FitError::Data(DataError::InsufficientSamples {
                distinct: 2,
                required: 3
            }))
        );
    }

    #[test]
    fn fit_1d_rejects_non_finite() {
        let samples = [(1.0, 2.0), (f64::INFINITY, 2.5)];
        assert_eq!(
            fit_1d(&samples, 1),
            Err(FitError::Data(DataError::NonFiniteSample { index: 1 }))
        );
    }

    #[test]
    fn fit_1d_up_to_caps_degree_by_distinct_samples() {
        let line = fit_1d_up_to(&[(5.0, 1.0), (7.0, 2.0)], 2).unwrap();
        assert_eq!(line.degree(), 1);
        assert_relative_eq!(line.eval(6.0), 1.5, epsilon = 1e-12);

        let constant = fit_1d_up_to(&[(6.0, 2800.0)], 2).unwrap();
        assert_eq!(constant.coefficients(), &[2800.0]);

        assert!(fit_1d_up_to(&[], 2).is_err());

        let uncapped = fit_1d_up_to(&[(5.0, 1.0), (6.0, 1.5), (7.0, 1.8)], 1).unwrap();
        assert_eq!(uncapped.degree(), 1);
    }

    #[test]
    fn fit_2d_recovers_quadratic_surface() {
        // z = 0.01 + 0.002 v + 3e-5 x - 1e-4 v² + 2e-7 v x - 4e-9 x²
        let truth = |v: f64, x: f64| {
            0.01 + 0.002 * v + 3e-5 * x - 1e-4 * v * v + 2e-7 * v * x - 4e-9 * x * x
        };
        let samples: Vec<(f64, f64, f64)> = [4.0, 6.0, 8.0, 10.0]
            .iter()
            .flat_map(|&v| {
                [500.0, 1200.0, 2000.0, 2800.0]
                    .into_iter()
                    .map(move |x| (v, x, truth(v, x)))
            })
            .collect();

        let fit = fit_2d(&samples, 2).unwrap();
        assert_eq!(fit.order(), 2);
        assert_relative_eq!(fit.coefficient(0, 0), 0.01, max_relative = 1e-6);
        assert_relative_eq!(fit.coefficient(1, 1), 2e-7, max_relative = 1e-6);
        assert_relative_eq!(fit.coefficient(0, 2), -4e-9, max_relative = 1e-6);
        assert_eq!(fit.coefficient(2, 2), 0.0);
        assert_eq!(fit.coefficient(5, 0), 0.0);

        for &(v, x, z) in &samples {
            assert_relative_eq!(fit.eval(v, x), z, max_relative = 1e-9);
        }
        assert_relative_eq!(fit.eval(5.0, 1600.0), truth(5.0, 1600.0), max_relative = 1e-9);
    }

    #[test]
    fn fit_2d_needs_several_vane_counts() {
        let samples: Vec<(f64, f64, f64)> = (0..8)
            .map(|i| (6.0, 500.0 + 250.0 * f64::from(i), 0.1 + 0.01 * f64::from(i)))
            .collect();

        assert!(matches!(
            fit_2d(&samples, 2),
            Err(FitError::Numerical(NumericalError::RankDeficient { .. }))
        ));
    }

    #[test]
    fn fit_2d_counts_distinct_pairs() {
        let samples = [(5.0, 500.0, 1.0), (5.0, 500.0, 1.1), (6.0, 800.0, 1.2)];
        assert_eq!(
            fit_2d(&samples, 1),
            Err(FitError::Data(DataError::InsufficientSamples {
                distinct: 2,
                required: 3
            }))
        );
    }

    proptest! {
        #[test]
        fn interpolating_fit_reproduces_samples(
            ys in proptest::collection::vec(-10.0f64..10.0, 2..6),
        ) {
            let samples: Vec<(f64, f64)> = ys
                .iter()
                .enumerate()
                .map(|(i, &y)| (500.0 + 400.0 * i as f64, y))
                .collect();
            let fit = fit_1d(&samples, samples.len() - 1).unwrap();
            for &(x, y) in &samples {
                prop_assert!((fit.eval(x) - y).abs() < 1e-6);
            }
        }

        #[test]
        fn residual_shrinks_as_degree_rises(
            points in proptest::collection::vec((0.0f64..0.5, -1.0f64..1.0), 3..8),
        ) {
            let samples: Vec<(f64, f64)> = points
                .iter()
                .enumerate()
                .map(|(i, &(jitter, y))| (i as f64 + jitter, y))
                .collect();
            let residuals = |degree: usize| {
                let fit = fit_1d(&samples, degree).unwrap();
                let errors: Vec<f64> = samples.iter().map(|&(x, y)| fit.eval(x) - y).collect();
                let sum_sq = errors.iter().map(|e| e * e).sum::<f64>();
                let max_abs = errors.iter().fold(0.0f64, |m, e| m.max(e.abs()));
                (sum_sq, max_abs)
            };

            let top = samples.len() - 1;
            let by_degree: Vec<(f64, f64)> = (0..=top).map(residuals).collect();
            for pair in by_degree.windows(2) {
                let (lower_degree, higher_degree) = (pair[0].0, pair[1].0);
                prop_assert!(higher_degree <= lower_degree + 1e-9 * (1.0 + lower_degree));
            }
            prop_assert!(by_degree[top].1 < 1e-8);
            prop_assert!(by_degree[top].1 <= by_degree[0].1 + 1e-12);
        }
    }
}
