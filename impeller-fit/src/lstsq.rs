//! Dense linear least squares by Householder QR.
//!
//! The systems solved here are tiny (at most a few dozen rows and ten
//! columns), but the monomial columns they are built from span many orders
//! of magnitude: `x^3` at a specific speed of 3000 is around `2.7e10`.
//!
//! Implementation choices:
//! - Columns are scaled to unit norm before factoring and the solution is
//!   unscaled afterwards, so the rank test compares like with like.
//! - Householder reflections are applied in place; `Q` is never formed.
//! - A column whose reflected diagonal falls below [`RANK_TOLERANCE`] relative
//!   to the largest diagonal counts as dependent, and the solve is refused
//!   rather than returning an arbitrary minimum-norm answer.

use ndarray::{Array1, Array2, s};

use crate::NumericalError;

/// Relative size of the smallest acceptable diagonal entry of `R`.
const RANK_TOLERANCE: f64 = 1e-12;

/// Solves `min ‖a·β − b‖₂` for a tall or square design matrix `a`.
///
/// # Errors
///
/// Returns [`NumericalError::RankDeficient`] if the columns of `a` are
/// numerically dependent (including when `a` has fewer rows than columns),
/// or [`NumericalError::NonFiniteSolution`] if the result is not finite.
pub(crate) fn solve_least_squares(
    a: &Array2<f64>,
    b: &Array1<f64>,
) -> Result<Array1<f64>, NumericalError> {
    let (rows, columns) = a.dim();
    if rows < columns {
        return Err(NumericalError::RankDeficient {
            rank: rows,
            columns,
        });
    }

    let scales: Vec<f64> = a.columns().into_iter().map(|c| c.dot(&c).sqrt()).collect();
    if scales.iter().any(|s| !s.is_finite()) {
        return Err(NumericalError::NonFiniteSolution);
    }

    let mut r = a.clone();
    for (mut column, &scale) in r.columns_mut().into_iter().zip(&scales) {
        if scale > 0.0 {
            column /= scale;
        }
    }
    let mut qtb = b.clone();

    for k in 0..columns {
        let head = r.slice(s![k.., k]);
        let norm = head.dot(&head).sqrt();
        if norm == 0.0 {
            continue;
        }

        let alpha = if r[[k, k]] > 0.0 { -norm } else { norm };
        let mut v = head.to_owned();
        v[0] -= alpha;
        let v_norm_sq = v.dot(&v);
        if v_norm_sq == 0.0 {
            continue;
        }

        for j in k..columns {
            let mut column = r.slice_mut(s![k.., j]);
            let factor = 2.0 * v.dot(&column) / v_norm_sq;
            column.scaled_add(-factor, &v);
        }

        let mut tail = qtb.slice_mut(s![k..]);
        let factor = 2.0 * v.dot(&tail) / v_norm_sq;
        tail.scaled_add(-factor, &v);
    }

    let diagonal: Vec<f64> = (0..columns).map(|k| r[[k, k]].abs()).collect();
    let largest = diagonal.iter().copied().fold(0.0, f64::max);
    let rank = diagonal
        .iter()
        .filter(|&&d| d > largest * RANK_TOLERANCE)
        .count();
    if largest == 0.0 || rank < columns {
        return Err(NumericalError::RankDeficient { rank, columns });
    }

    let mut beta = Array1::<f64>::zeros(columns);
    for k in (0..columns).rev() {
        let known = r.slice(s![k, k + 1..]).dot(&beta.slice(s![k + 1..]));
        beta[k] = (qtb[k] - known) / r[[k, k]];
    }
    for (coefficient, &scale) in beta.iter_mut().zip(&scales) {
        *coefficient /= scale;
    }

    if beta.iter().all(|c| c.is_finite()) {
        Ok(beta)
    } else {
        Err(NumericalError::NonFiniteSolution)
    }
}
