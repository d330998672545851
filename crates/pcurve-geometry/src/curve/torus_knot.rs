//! Torus knot curve.

use std::f64::consts::PI;

use pcurve_core::{CurveError, Result};
use pcurve_math::dvec3;
use serde::{Deserialize, Serialize};

use super::{check_order, Curve, Evaluation};

/// Construction inputs of a [`TorusKnot`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorusKnotParams {
    pub p: i32,
    pub q: i32,
    pub major_radius: f64,
}

/// A (p, q) torus knot with exact first and second derivatives:
///
/// ```text
/// x = (R + cos qt) cos pt
/// y = (R + cos qt) sin pt
/// z = sin qt
/// ```
///
/// parameterized over `[0, 2πq]`. The default is the (2, 3) knot with `R = 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TorusKnotParams", into = "TorusKnotParams")]
pub struct TorusKnot {
    p: i32,
    q: i32,
    major_radius: f64,
}

impl TorusKnot {
    pub fn new(p: i32, q: i32, major_radius: f64) -> Result<Self> {
        if q <= 0 {
            return Err(CurveError::InvalidArgument(format!(
                "torus knot needs a positive loop count q, got {q}"
            )));
        }
        if !major_radius.is_finite() {
            return Err(CurveError::InvalidArgument(format!(
                "torus knot major radius must be finite, got {major_radius}"
            )));
        }
        Ok(Self { p, q, major_radius })
    }

    /// Twists around the torus axis.
    pub fn p(&self) -> i32 {
        self.p
    }

    /// Loops through the torus hole.
    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }
}

impl Default for TorusKnot {
    fn default() -> Self {
        Self {
            p: 2,
            q: 3,
            major_radius: 2.0,
        }
    }
}

impl Curve for TorusKnot {
    /// Defined for every real `t`; the curve is periodic so no wrapping is applied.
    fn evaluate(&self, t: f64, order: usize) -> Result<Evaluation> {
        check_order("TorusKnot", order, self.max_order())?;

        let p = f64::from(self.p);
        let q = f64::from(self.q);
        let (sp, cp) = (p * t).sin_cos();
        let (sq, cq) = (q * t).sin_cos();
        let r = self.major_radius + cq;

        let mut eval = Evaluation::new(dvec3(r * cp, r * sp, sq), order);

        if order >= 1 {
            eval.push_derivative(dvec3(
                -p * r * sp - q * sq * cp,
                p * r * cp - q * sq * sp,
                q * cq,
            ));
        }

        if order >= 2 {
            eval.push_derivative(dvec3(
                -p * p * r * cp + 2.0 * p * q * sq * sp - q * q * cq * cp,
                -p * p * r * sp - 2.0 * p * q * sq * cp - q * q * cq * sp,
                -q * q * sq,
            ));
        }

        Ok(eval)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 2.0 * PI * f64::from(self.q))
    }

    fn max_order(&self) -> usize {
        2
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl TryFrom<TorusKnotParams> for TorusKnot {
    type Error = CurveError;

    fn try_from(params: TorusKnotParams) -> Result<Self> {
        Self::new(params.p, params.q, params.major_radius)
    }
}

impl From<TorusKnot> for TorusKnotParams {
    fn from(knot: TorusKnot) -> Self {
        Self {
            p: knot.p,
            q: knot.q,
            major_radius: knot.major_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pcurve_math::DVec3;

    const SAMPLE_TS: [f64; 6] = [0.0, 0.37, 1.2, 2.9, 5.5, 17.0];

    #[test]
    fn test_default_domain() {
        let knot = TorusKnot::default();
        assert_eq!(knot.domain_start(), 0.0);
        assert_abs_diff_eq!(knot.domain_end(), 6.0 * PI, epsilon = 1e-12);
        assert!(knot.is_closed());
    }

    #[test]
    fn test_start_point() {
        let p = TorusKnot::default().point_at(0.0).unwrap();
        assert!((p - DVec3::new(3.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_closed_over_domain() {
        let knot = TorusKnot::default();
        let start = knot.point_at(0.0).unwrap();
        let end = knot.point_at(6.0 * PI).unwrap();
        assert!((start - end).length() < 1e-9);
    }

    #[test]
    fn test_periodic() {
        let knot = TorusKnot::default();
        for &t in &SAMPLE_TS {
            let a = knot.point_at(t).unwrap();
            let b = knot.point_at(t + 6.0 * PI).unwrap();
            assert!((a - b).length() < 1e-9, "not periodic at t={}", t);
        }
    }

    #[test]
    fn test_lies_on_torus() {
        let knot = TorusKnot::default();
        for &t in &SAMPLE_TS {
            let p = knot.point_at(t).unwrap();
            let rho = (p.x * p.x + p.y * p.y).sqrt();
            // Distance from the tube's centre circle is the unit minor radius.
            assert_abs_diff_eq!((rho - 2.0).powi(2) + p.z * p.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_first_derivative_matches_finite_difference() {
        let knot = TorusKnot::default();
        let h = 1e-6;
        for &t in &SAMPLE_TS {
            let analytic = knot.tangent_at(t).unwrap();
            let numeric =
                (knot.point_at(t + h).unwrap() - knot.point_at(t - h).unwrap()) / (2.0 * h);
            assert!(
                (analytic - numeric).length() < 1e-6,
                "d1 mismatch at t={}: {:?} vs {:?}",
                t,
                analytic,
                numeric
            );
        }
    }

    #[test]
    fn test_second_derivative_matches_finite_difference() {
        let knot = TorusKnot::new(3, 5, 2.5).unwrap();
        let h = 1e-5;
        for &t in &SAMPLE_TS {
            let eval = knot.evaluate(t, 2).unwrap();
            let d1_plus = knot.tangent_at(t + h).unwrap();
            let d1_minus = knot.tangent_at(t - h).unwrap();
            let numeric = (d1_plus - d1_minus) / (2.0 * h);
            assert!(
                (eval[2] - numeric).length() < 1e-5,
                "d2 mismatch at t={}: {:?} vs {:?}",
                t,
                eval[2],
                numeric
            );
        }
    }

    #[test]
    fn test_third_derivative_unsupported() {
        let knot = TorusKnot::default();
        assert_eq!(knot.evaluate(1.0, 2).unwrap().order(), 2);
        assert!(matches!(
            knot.evaluate(1.0, 3),
            Err(CurveError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(TorusKnot::new(2, 0, 2.0).is_err());
        assert!(TorusKnot::new(2, 3, f64::INFINITY).is_err());
        let knot = TorusKnot::new(3, 7, 1.5).unwrap();
        assert_eq!((knot.p(), knot.q(), knot.major_radius()), (3, 7, 1.5));
    }
}
