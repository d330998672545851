//! Knot vector construction and span lookup.

/// Build a clamped knot vector with unit-spaced interior knots.
///
/// For `n` control points the vector has `n + degree + 1` entries: `degree + 1`
/// zeros, the interior knots `1, 2, ...`, and `degree + 1` copies of the
/// maximum `n - degree`.
///
/// # Panics
/// If `n_ctrl <= degree`.
pub fn clamped_uniform_knots(degree: usize, n_ctrl: usize) -> Vec<f64> {
    assert!(n_ctrl > degree, "Need at least degree+1 control points");
    let m = n_ctrl + degree + 1;
    let max_value = (m - 2 * (degree + 1) + 1) as f64;

    (0..m)
        .map(|i| {
            if i <= degree {
                0.0
            } else if i >= m - (degree + 1) {
                max_value
            } else {
                (i - degree) as f64
            }
        })
        .collect()
}

/// Check that `knots` has length `n_ctrl + degree + 1` and never decreases.
pub fn is_valid_knot_vector(knots: &[f64], degree: usize, n_ctrl: usize) -> bool {
    knots.len() == n_ctrl + degree + 1 && knots.windows(2).all(|w| w[0] <= w[1])
}

/// Find the knot span index for parameter `t` in the knot vector.
///
/// Returns the index `i` such that `knots[i] <= t < knots[i+1]`,
/// with special handling for the upper boundary.
///
/// # Arguments
/// * `degree` - Degree of the B-spline
/// * `knots` - The knot vector
/// * `n` - Number of control points minus 1
/// * `t` - Parameter value
pub fn find_span(degree: usize, knots: &[f64], n: usize, t: f64) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[degree] {
        return degree;
    }

    // Binary search
    let mut low = degree;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Compute the non-vanishing basis functions at parameter `t`.
///
/// Returns `degree + 1` values N_{span-degree,degree}(t) through
/// N_{span,degree}(t), using the triangular scheme.
pub fn basis_functions(degree: usize, knots: &[f64], span: usize, t: f64) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];

    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let temp = n[r] / (right[r + 1] + left[j - r]);
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }

        n[j] = saved;
    }

    n
}
