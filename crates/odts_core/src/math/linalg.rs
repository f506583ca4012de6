//! Dense linear algebra for small systems.
//!
//! The Newton step solves `H · step = g` once per iteration with `n` equal to
//! the number of objective variables, so a straightforward Gaussian
//! elimination with partial pivoting is sufficient.

use crate::types::LinalgError;
use num_traits::Float;

/// Euclidean (L2) norm of a vector.
///
/// # Example
///
/// ```
/// use odts_core::math::linalg::norm;
///
/// assert_eq!(norm(&[3.0_f64, 4.0]), 5.0);
/// assert_eq!(norm::<f64>(&[]), 0.0);
/// ```
pub fn norm<T: Float>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
}

/// Transpose a row-major matrix.
///
/// Rows are assumed to share the length of the first row.
pub fn transpose<T: Float>(m: &[Vec<T>]) -> Vec<Vec<T>> {
    let rows = m.len();
    let cols = m.first().map_or(0, Vec::len);
    (0..cols)
        .map(|c| (0..rows).map(|r| m[r][c]).collect())
        .collect()
}

/// Solve `A x = b` by LU factorisation with partial pivoting.
///
/// # Arguments
///
/// * `a` - Square coefficient matrix (row-major)
/// * `b` - Right-hand side
///
/// # Returns
///
/// * `Ok(x)` - Solution vector
/// * `Err(LinalgError::Singular)` - A pivot was exactly zero or not finite
/// * `Err(LinalgError::NonFinite)` - Back substitution produced NaN or infinity
/// * `Err(LinalgError::NotSquare)` / `Err(LinalgError::DimensionMismatch)` - Malformed input
///
/// # Example
///
/// ```
/// use odts_core::math::linalg::lu_solve;
/// use odts_core::types::LinalgError;
///
/// let singular = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
/// assert_eq!(
///     lu_solve(&singular, &[1.0, 1.0]),
///     Err(LinalgError::Singular { pivot: 1 })
/// );
/// ```
pub fn lu_solve<T: Float>(a: &[Vec<T>], b: &[T]) -> Result<Vec<T>, LinalgError> {
    let n = a.len();
    if let Some(row) = a.iter().find(|row| row.len() != n) {
        return Err(LinalgError::NotSquare {
            rows: n,
            cols: row.len(),
        });
    }
    if b.len() != n {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            actual: b.len(),
        });
    }

    let mut lu = a.to_vec();
    let mut rhs = b.to_vec();

    // Forward elimination
    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_abs = lu[k][k].abs();
        for i in (k + 1)..n {
            let candidate = lu[i][k].abs();
            if candidate > pivot_abs {
                pivot_row = i;
                pivot_abs = candidate;
            }
        }

        if pivot_abs == T::zero() || !pivot_abs.is_finite() {
            return Err(LinalgError::Singular { pivot: k });
        }

        lu.swap(k, pivot_row);
        rhs.swap(k, pivot_row);

        for i in (k + 1)..n {
            let factor = lu[i][k] / lu[k][k];
            for j in k..n {
                let delta = factor * lu[k][j];
                lu[i][j] = lu[i][j] - delta;
            }
            let delta = factor * rhs[k];
            rhs[i] = rhs[i] - delta;
        }
    }

    // Back substitution
    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..n {
            sum = sum - lu[i][j] * x[j];
        }
        x[i] = sum / lu[i][i];
    }

    if x.iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite);
    }

    Ok(x)
}
