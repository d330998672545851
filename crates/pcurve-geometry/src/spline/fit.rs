//! Least-squares fitting of quadratic B-spline control points to a point cloud.

use log::debug;
use nalgebra::DMatrix;
use pcurve_core::{CurveError, Result, Tolerance};
use pcurve_math::{dvec3, Point3};

use super::knot::{basis_functions, clamped_uniform_knots, find_span};

/// Fit `n_ctrl` control points of a degree-`degree` clamped B-spline to `samples`
/// with every sample weighted equally.
pub fn least_squares_fit(degree: usize, samples: &[Point3], n_ctrl: usize) -> Result<Vec<Point3>> {
    weighted_least_squares_fit(degree, samples, &vec![1.0; samples.len()], n_ctrl)
}

/// Fit `n_ctrl` control points minimizing `Σ w_i ‖Σ_j N_ij c_j − p_i‖²`.
///
/// Sample `i` of `m` is assigned the parameter `end · i / (m − 1)`, spreading
/// the samples uniformly over the domain of the clamped knot vector built by
/// [`clamped_uniform_knots`]. The normal equations `(NᵀWN) c = NᵀW p` are
/// solved by Cholesky factorization.
pub fn weighted_least_squares_fit(
    degree: usize,
    samples: &[Point3],
    weights: &[f64],
    n_ctrl: usize,
) -> Result<Vec<Point3>> {
    if n_ctrl == 0 {
        return Err(CurveError::InvalidArgument(
            "control point count must be positive".into(),
        ));
    }
    if n_ctrl <= degree {
        return Err(CurveError::InvalidArgument(format!(
            "a degree {degree} fit needs at least {} control points, got {n_ctrl}",
            degree + 1
        )));
    }
    let m = samples.len();
    if m < n_ctrl {
        return Err(CurveError::InvalidArgument(format!(
            "cannot fit {n_ctrl} control points to {m} samples"
        )));
    }
    if weights.len() != m {
        return Err(CurveError::InvalidArgument(format!(
            "expected {m} weights, got {}",
            weights.len()
        )));
    }
    if let Some(w) = weights.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
        return Err(CurveError::InvalidArgument(format!(
            "sample weights must be positive and finite, got {w}"
        )));
    }

    let knots = clamped_uniform_knots(degree, n_ctrl);
    let params = sample_parameters(degree, &knots, m);
    let n = basis_matrix(degree, &knots, n_ctrl, &params);
    let p = DMatrix::from_fn(m, 3, |i, c| samples[i][c]);

    // W·N, so that (W·N)ᵀ = NᵀW
    let wn = DMatrix::from_fn(m, n_ctrl, |i, j| weights[i] * n[(i, j)]);
    let lhs = wn.transpose() * &n;
    let rhs = wn.transpose() * &p;

    let cholesky = lhs
        .cholesky()
        .ok_or_else(|| CurveError::Geometry("least-squares normal matrix is not positive definite".into()))?;
    let tol = Tolerance::default();
    if cholesky.l().diagonal().iter().any(|&d| tol.is_zero(d)) {
        return Err(CurveError::Geometry(
            "least-squares normal matrix is singular".into(),
        ));
    }
    let solution = cholesky.solve(&rhs);

    let residual = &n * &solution - &p;
    debug!(
        "least-squares fit: {m} samples -> {n_ctrl} control points, rms residual {:.3e}",
        (residual.norm_squared() / m as f64).sqrt()
    );

    Ok((0..n_ctrl)
        .map(|j| dvec3(solution[(j, 0)], solution[(j, 1)], solution[(j, 2)]))
        .collect())
}

/// Uniformly spaced parameters over the domain `[knots[degree], knots[len - degree - 1]]`.
pub fn sample_parameters(degree: usize, knots: &[f64], m: usize) -> Vec<f64> {
    let start = knots[degree];
    let end = knots[knots.len() - degree - 1];
    if m < 2 {
        return vec![start; m];
    }
    (0..m)
        .map(|i| start + (end - start) * i as f64 / (m - 1) as f64)
        .collect()
}

/// Assemble the `params.len() × n_ctrl` basis matrix, row `i` holding the
/// non-vanishing basis functions at `params[i]`.
pub fn basis_matrix(degree: usize, knots: &[f64], n_ctrl: usize, params: &[f64]) -> DMatrix<f64> {
    let mut n = DMatrix::zeros(params.len(), n_ctrl);
    for (row, &t) in params.iter().enumerate() {
        let span = find_span(degree, knots, n_ctrl - 1, t);
        let local = basis_functions(degree, knots, span, t);
        for (j, &value) in local.iter().enumerate() {
            n[(row, span - degree + j)] = value;
        }
    }
    n
}
