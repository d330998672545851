//! Host-side sampling of curves: uniform parameter sampling and adaptive
//! polylines.

use log::trace;
use pcurve_core::{CurveError, Result};
use pcurve_math::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::curve::{Curve, Evaluation};

/// How a host samples a curve for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    /// Number of samples, including both domain ends.
    pub samples: usize,
    /// Derivative order evaluated at each sample.
    pub order: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            samples: 100,
            order: 0,
        }
    }
}

/// Uniformly spaced parameters from the start to the end of the domain.
pub fn sample_parameters(curve: &dyn Curve, samples: usize) -> Result<Vec<f64>> {
    if samples < 2 {
        return Err(CurveError::InvalidArgument(format!(
            "sampling needs at least 2 samples, got {samples}"
        )));
    }
    let (t_min, t_max) = curve.domain();
    let last = (samples - 1) as f64;
    Ok((0..samples)
        .map(|i| t_min + (t_max - t_min) * i as f64 / last)
        .collect())
}

/// Evaluate `curve` at `options.samples` uniformly spaced parameters.
pub fn sample_uniform(curve: &dyn Curve, options: &SampleOptions) -> Result<Vec<Evaluation>> {
    let params = sample_parameters(curve, options.samples)?;
    trace!("sampling {} parameters at order {}", params.len(), options.order);
    params
        .into_iter()
        .map(|t| curve.evaluate(t, options.order))
        .collect()
}

/// Parallel version of [`sample_uniform`], yielding the same results in the same order.
pub fn sample_uniform_par(curve: &dyn Curve, options: &SampleOptions) -> Result<Vec<Evaluation>> {
    let params = sample_parameters(curve, options.samples)?;
    trace!(
        "sampling {} parameters at order {} in parallel",
        params.len(),
        options.order
    );
    params
        .par_iter()
        .map(|&t| curve.evaluate(t, options.order))
        .collect()
}

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The algorithm recursively subdivides segments where the midpoint deviation
/// from the chord exceeds the given `tolerance`. The first levels are always
/// split so closed curves, whose chord over the full domain is a single
/// point, are not collapsed.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
///
/// # Returns
/// A vector of points approximating the curve.
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Result<Vec<Point3>> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(CurveError::InvalidArgument(format!(
            "polyline tolerance must be positive, got {tolerance}"
        )));
    }
    let (t_min, t_max) = curve.domain();
    let mut points = vec![curve.point_at(t_min)?];
    subdivide_curve(curve, t_min, t_max, tolerance, &mut points, 0)?;
    trace!("polyline with {} points", points.len());
    Ok(points)
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

/// Depth up to which segments are split regardless of deviation.
const MIN_DEPTH: u32 = 2;

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) -> Result<()> {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1)?);
        return Ok(());
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0)?;
    let p1 = curve.point_at(t1)?;
    let p_mid = curve.point_at(t_mid)?;

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if depth < MIN_DEPTH || deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1)?;
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1)?;
    } else {
        points.push(p1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{QuadraticBSpline, SubdivisionCurve, TorusKnot};
    use pcurve_math::dvec3;

    fn line_spline() -> QuadraticBSpline {
        QuadraticBSpline::new(vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(5.0, 0.0, 0.0),
            dvec3(10.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = SampleOptions::default();
        assert_eq!(options.samples, 100);
        assert_eq!(options.order, 0);
    }

    #[test]
    fn test_sample_parameters_cover_domain() {
        let knot = TorusKnot::default();
        let params = sample_parameters(&knot, 5).unwrap();
        assert_eq!(params.len(), 5);
        assert_eq!(params[0], 0.0);
        assert_eq!(params[4], knot.domain_end());
    }

    #[test]
    fn test_sample_count_too_small() {
        let knot = TorusKnot::default();
        assert!(matches!(
            sample_parameters(&knot, 1),
            Err(CurveError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sample_uniform_with_tangents() {
        let square = vec![
            dvec3(-1.0, -1.0, 0.0),
            dvec3(1.0, -1.0, 0.0),
            dvec3(1.0, 1.0, 0.0),
            dvec3(-1.0, 1.0, 0.0),
        ];
        let curve = SubdivisionCurve::new(square, 4).unwrap();
        let options = SampleOptions {
            samples: 500,
            order: 1,
        };
        let evals = sample_uniform(&curve, &options).unwrap();
        assert_eq!(evals.len(), 500);
        assert!(evals.iter().all(|e| e.order() == 1));
        assert!((evals[0].position() - evals[499].position()).length() < 1e-12);
    }

    #[test]
    fn test_sample_uniform_propagates_order_error() {
        let options = SampleOptions {
            samples: 10,
            order: 1,
        };
        assert!(matches!(
            sample_uniform(&line_spline(), &options),
            Err(CurveError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let knot = TorusKnot::default();
        let options = SampleOptions {
            samples: 257,
            order: 2,
        };
        let serial = sample_uniform(&knot, &options).unwrap();
        let parallel = sample_uniform_par(&knot, &options).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_polyline_straight_spline() {
        let points = curve_to_polyline(&line_spline(), 0.01).unwrap();
        // Only the forced levels split a straight curve.
        assert_eq!(points.len(), 5);
        assert!((points[0] - dvec3(0.0, 0.0, 0.0)).length() < 1e-10);
        assert!((points[4] - dvec3(10.0, 0.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_polyline_torus_knot() {
        let knot = TorusKnot::default();
        let points = curve_to_polyline(&knot, 0.01).unwrap();
        assert!(
            points.len() > 50,
            "Torus knot should produce many points, got {}",
            points.len()
        );
        assert!((points[0] - *points.last().unwrap()).length() < 1e-9);
        for p in &points {
            let rho = (p.x * p.x + p.y * p.y).sqrt();
            assert!(((rho - 2.0).powi(2) + p.z * p.z - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_polyline_rejects_bad_tolerance() {
        assert!(curve_to_polyline(&TorusKnot::default(), 0.0).is_err());
    }
}
