//! pcurve geometry: parametric curves built from control polygons.
//!
//! Three curves share the [`Curve`] evaluation contract: a closed
//! Lane–Riesenfeld subdivision curve, a quadratic B-spline (optionally
//! least-squares fitted to a point cloud), and a torus knot.

pub mod curve;
pub mod sample;
pub mod spline;

pub use curve::{AnyCurve, Curve, Evaluation, QuadraticBSpline, SubdivisionCurve, TorusKnot};
pub use sample::SampleOptions;
