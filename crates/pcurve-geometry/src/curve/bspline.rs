//! Quadratic B-spline curve with a clamped, uniformly spaced knot vector.

use log::debug;
use pcurve_core::traits::{BoundingBox, Validate};
use pcurve_core::{CurveError, Result};
use pcurve_math::{Aabb3, DVec3, Point3};
use serde::{Deserialize, Serialize};

use super::{check_order, Curve, Evaluation};
use crate::spline::{self, knot};

/// Construction inputs of a [`QuadraticBSpline`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBSplineParams {
    pub control_points: Vec<Point3>,
}

/// An open degree-2 B-spline curve.
///
/// The knot vector is derived from the control-point count: three zeros,
/// interior knots `1, 2, ...`, and three copies of `n - 2`. The curve is
/// evaluated by summing Cox–de Boor basis functions over all control points
/// and supports positions only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuadraticBSplineParams", into = "QuadraticBSplineParams")]
pub struct QuadraticBSpline {
    control_points: Vec<Point3>,
    knots: Vec<f64>,
}

impl QuadraticBSpline {
    pub const DEGREE: usize = 2;

    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        if control_points.len() <= Self::DEGREE {
            return Err(CurveError::InvalidArgument(format!(
                "quadratic B-spline needs at least {} control points, got {}",
                Self::DEGREE + 1,
                control_points.len()
            )));
        }
        let knots = knot::clamped_uniform_knots(Self::DEGREE, control_points.len());
        debug!(
            "quadratic B-spline: {} control points, knots {:?}",
            control_points.len(),
            knots
        );
        Ok(Self {
            control_points,
            knots,
        })
    }

    /// Approximate `samples` with `n_ctrl` control points by least squares.
    pub fn fit(samples: &[Point3], n_ctrl: usize) -> Result<Self> {
        Self::new(spline::least_squares_fit(Self::DEGREE, samples, n_ctrl)?)
    }

    /// Like [`QuadraticBSpline::fit`] with a positive weight per sample.
    pub fn fit_weighted(samples: &[Point3], weights: &[f64], n_ctrl: usize) -> Result<Self> {
        Self::new(spline::weighted_least_squares_fit(
            Self::DEGREE,
            samples,
            weights,
            n_ctrl,
        )?)
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Quadratic basis function `N_{i,2}(t)`.
    pub fn basis(&self, i: usize, t: f64) -> f64 {
        spline::basis(&self.knots, self.control_points.len(), i, Self::DEGREE, t)
    }
}

impl Curve for QuadraticBSpline {
    /// Position only; any derivative request fails with
    /// [`CurveError::UnsupportedOperation`]. Parameters outside the domain are
    /// clamped to it.
    fn evaluate(&self, t: f64, order: usize) -> Result<Evaluation> {
        check_order("QuadraticBSpline", order, self.max_order())?;
        let t = self.normalize_parameter(t)?;

        let position = self
            .control_points
            .iter()
            .enumerate()
            .fold(DVec3::ZERO, |acc, (i, &c)| acc + self.basis(i, t) * c);
        Ok(Evaluation::new(position, order))
    }

    fn domain(&self) -> (f64, f64) {
        let k = &self.knots;
        (k[Self::DEGREE], k[k.len() - Self::DEGREE - 1])
    }

    fn max_order(&self) -> usize {
        0
    }
}

impl Validate for QuadraticBSpline {
    fn validate(&self) -> Result<()> {
        if knot::is_valid_knot_vector(&self.knots, Self::DEGREE, self.control_points.len()) {
            Ok(())
        } else {
            Err(CurveError::Validation(format!(
                "knot vector {:?} does not fit {} control points of degree {}",
                self.knots,
                self.control_points.len(),
                Self::DEGREE
            )))
        }
    }
}

impl BoundingBox for QuadraticBSpline {
    type Point = Point3;

    /// Box of the control polygon, which contains the curve.
    fn bounding_box(&self) -> (Point3, Point3) {
        Aabb3::from_points(&self.control_points)
            .map(Into::into)
            .unwrap_or_default()
    }
}

impl TryFrom<QuadraticBSplineParams> for QuadraticBSpline {
    type Error = CurveError;

    fn try_from(params: QuadraticBSplineParams) -> Result<Self> {
        Self::new(params.control_points)
    }
}

impl From<QuadraticBSpline> for QuadraticBSplineParams {
    fn from(curve: QuadraticBSpline) -> Self {
        Self {
            control_points: curve.control_points,
        }
    }
}
