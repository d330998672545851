//! The parametric curve contract and its implementations.

mod any;
mod bspline;
mod subdivision;
mod torus_knot;

use std::ops::Index;

use pcurve_core::{CurveError, Result, Tolerance};
use pcurve_math::{Point3, Vector3};

pub use any::AnyCurve;
pub use bspline::{QuadraticBSpline, QuadraticBSplineParams};
pub use subdivision::{SubdivisionCurve, SubdivisionCurveParams};
pub use torus_knot::{TorusKnot, TorusKnotParams};

/// Position followed by derivatives `1..=order` at a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    values: Vec<Vector3>,
}

impl Evaluation {
    pub(crate) fn new(position: Point3, order: usize) -> Self {
        let mut values = Vec::with_capacity(order + 1);
        values.push(position);
        Self { values }
    }

    pub(crate) fn push_derivative(&mut self, derivative: Vector3) {
        self.values.push(derivative);
    }

    pub fn position(&self) -> Point3 {
        self.values[0]
    }

    /// The `k`-th derivative; `derivative(0)` is the position.
    pub fn derivative(&self, k: usize) -> Option<Vector3> {
        self.values.get(k).copied()
    }

    /// Highest derivative order held.
    pub fn order(&self) -> usize {
        self.values.len() - 1
    }

    pub fn as_slice(&self) -> &[Vector3] {
        &self.values
    }
}

impl Index<usize> for Evaluation {
    type Output = Vector3;

    fn index(&self, k: usize) -> &Vector3 {
        &self.values[k]
    }
}

/// Trait for parametric curves in 3D space.
///
/// Implementations do all expensive work at construction; `evaluate` only reads
/// immutable state, so curves can be shared across threads.
pub trait Curve: Send + Sync {
    /// Position and derivatives up to `order` at parameter `t`.
    ///
    /// Fails with [`CurveError::UnsupportedOperation`] when `order` exceeds
    /// [`Curve::max_order`].
    fn evaluate(&self, t: f64, order: usize) -> Result<Evaluation>;

    /// Return the parameter domain `(t_min, t_max)`, both inclusive.
    fn domain(&self) -> (f64, f64);

    /// Highest derivative order `evaluate` supports.
    fn max_order(&self) -> usize;

    /// Whether the curve is closed (start == end).
    fn is_closed(&self) -> bool {
        false
    }

    fn domain_start(&self) -> f64 {
        self.domain().0
    }

    fn domain_end(&self) -> f64 {
        self.domain().1
    }

    fn point_at(&self, t: f64) -> Result<Point3> {
        Ok(self.evaluate(t, 0)?.position())
    }

    fn tangent_at(&self, t: f64) -> Result<Vector3> {
        Ok(self.evaluate(t, 1)?[1])
    }

    /// Map `t` into the domain: closed curves wrap periodically, open curves clamp.
    fn normalize_parameter(&self, t: f64) -> Result<f64> {
        if !t.is_finite() {
            return Err(CurveError::InvalidArgument(format!(
                "curve parameter must be finite, got {t}"
            )));
        }
        let (start, end) = self.domain();
        if (start..=end).contains(&t) {
            return Ok(t);
        }
        if self.is_closed() && end > start {
            Ok(wrap_parameter(t, start, end))
        } else {
            Ok(t.clamp(start, end))
        }
    }
}

/// Wrap `t` into `[start, end]` with period `end - start`.
///
/// Values within parametric tolerance past `end` snap to `end` instead of
/// wrapping to the start.
pub(crate) fn wrap_parameter(t: f64, start: f64, end: f64) -> f64 {
    let tol = Tolerance::default();
    if tol.parameter_eq(t, end) {
        return end;
    }
    if tol.parameter_eq(t, start) {
        return start;
    }
    start + (t - start).rem_euclid(end - start)
}

pub(crate) fn check_order(curve: &str, order: usize, max_order: usize) -> Result<()> {
    if order > max_order {
        return Err(CurveError::unsupported_order(curve, order, max_order));
    }
    Ok(())
}
