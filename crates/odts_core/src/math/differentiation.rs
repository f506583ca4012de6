//! Finite-difference second derivatives.
//!
//! # Scheme
//!
//! For each coordinate `i` the gradient is evaluated at `x ± eps·e_i`:
//!
//! ```text
//! row_i = (∇f(x + eps·e_i) − ∇f(x − eps·e_i)) / (2·eps)
//! H     = [row_0; row_1; …]^T
//! ```
//!
//! The assembled matrix is transposed before it is returned, so column `i`
//! holds the derivative of the gradient along coordinate `i`. The result is
//! not symmetrised: any asymmetry introduced by the differencing is kept.

/// Default perturbation magnitude for the central-difference Hessian.
pub const DEFAULT_HESSIAN_STEP: f64 = 1e-6;

/// Estimate the Hessian as the central-difference Jacobian of `gradient`.
///
/// # Arguments
///
/// * `gradient` - Gradient of the objective
/// * `x` - Point of evaluation
/// * `eps` - Perturbation applied to each coordinate independently
///
/// NaN or infinite gradient values propagate into the matrix unchanged.
///
/// # Example
///
/// ```
/// use odts_core::math::central_difference_hessian;
///
/// // f(x, y) = x² + 3xy  =>  ∇f = (2x + 3y, 3x)
/// let grad = |p: &[f64]| vec![2.0 * p[0] + 3.0 * p[1], 3.0 * p[0]];
/// let h = central_difference_hessian(grad, &[1.0, 1.0], 1e-6);
///
/// assert!((h[0][0] - 2.0).abs() < 1e-6);
/// assert!((h[0][1] - 3.0).abs() < 1e-6);
/// assert!((h[1][0] - 3.0).abs() < 1e-6);
/// assert!(h[1][1].abs() < 1e-6);
/// ```
pub fn central_difference_hessian<G>(gradient: G, x: &[f64], eps: f64) -> Vec<Vec<f64>>
where
    G: Fn(&[f64]) -> Vec<f64>,
{
    let n = x.len();
    let mut rows = vec![vec![0.0; n]; n];

    for i in 0..n {
        let mut x_plus = x.to_vec();
        x_plus[i] += eps;
        let mut x_minus = x.to_vec();
        x_minus[i] -= eps;

        let g_plus = gradient(&x_plus);
        let g_minus = gradient(&x_minus);
        debug_assert_eq!(g_plus.len(), n, "gradient length must match the point dimension");
        debug_assert_eq!(g_minus.len(), n, "gradient length must match the point dimension");

        for (k, (gp, gm)) in g_plus.iter().zip(&g_minus).enumerate().take(n) {
            rows[i][k] = (gp - gm) / (2.0 * eps);
        }
    }

    super::linalg::transpose(&rows)
}
