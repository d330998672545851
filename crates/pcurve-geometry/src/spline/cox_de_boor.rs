//! Recursive Cox–de Boor basis evaluation.

/// Evaluate the B-spline basis function `N_{i,degree}(t)` over `knots`.
///
/// `n_ctrl` is the number of control points; it selects the span that also
/// owns the final knot, so the basis still sums to one at the end of the
/// domain. Terms whose knot span has zero width contribute nothing.
pub fn basis(knots: &[f64], n_ctrl: usize, i: usize, degree: usize, t: f64) -> f64 {
    if degree == 0 {
        let last = knots[knots.len() - 1];
        let in_span = knots[i] <= t && t < knots[i + 1];
        let closes_domain = t == last && i == n_ctrl - 1;
        return if in_span || closes_domain { 1.0 } else { 0.0 };
    }

    let denom1 = knots[i + degree] - knots[i];
    let term1 = if denom1 != 0.0 {
        (t - knots[i]) / denom1 * basis(knots, n_ctrl, i, degree - 1, t)
    } else {
        0.0
    };

    let denom2 = knots[i + degree + 1] - knots[i + 1];
    let term2 = if denom2 != 0.0 {
        (knots[i + degree + 1] - t) / denom2 * basis(knots, n_ctrl, i + 1, degree - 1, t)
    } else {
        0.0
    };

    term1 + term2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spline::knot::{basis_functions, clamped_uniform_knots, find_span};

    #[test]
    fn test_degree_zero_indicator() {
        let knots = clamped_uniform_knots(2, 5);
        assert_eq!(basis(&knots, 5, 2, 0, 0.5), 1.0);
        assert_eq!(basis(&knots, 5, 3, 0, 0.5), 0.0);
        // Only the last span owns the final knot.
        assert_eq!(basis(&knots, 5, 4, 0, 3.0), 1.0);
        assert_eq!(basis(&knots, 5, 3, 0, 3.0), 0.0);
    }

    #[test]
    fn test_partition_of_unity() {
        let n = 6;
        let knots = clamped_uniform_knots(2, n);
        let end = knots[knots.len() - 3];
        for s in 0..=40 {
            let t = end * s as f64 / 40.0;
            let sum: f64 = (0..n).map(|i| basis(&knots, n, i, 2, t)).sum();
            assert!(
                (sum - 1.0).abs() < 1e-12,
                "Partition of unity failed at t={}: sum={}",
                t,
                sum
            );
        }
    }

    #[test]
    fn test_matches_triangular_scheme() {
        let n = 7;
        let degree = 2;
        let knots = clamped_uniform_knots(degree, n);
        for &t in &[0.0, 0.3, 1.0, 2.75, 4.1, 5.0] {
            let span = find_span(degree, &knots, n - 1, t);
            let local = basis_functions(degree, &knots, span, t);
            for (j, &expected) in local.iter().enumerate() {
                let i = span - degree + j;
                let value = basis(&knots, n, i, degree, t);
                assert!(
                    (value - expected).abs() < 1e-12,
                    "N_{} mismatch at t={}: {} vs {}",
                    i,
                    t,
                    value,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_non_negative() {
        let n = 5;
        let knots = clamped_uniform_knots(2, n);
        for s in 0..=30 {
            let t = 3.0 * s as f64 / 30.0;
            for i in 0..n {
                assert!(basis(&knots, n, i, 2, t) >= 0.0);
            }
        }
    }
}
