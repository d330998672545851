//! Knot vectors, basis functions, and least-squares fitting for clamped B-splines.

pub mod cox_de_boor;
pub mod fit;
pub mod knot;

pub use cox_de_boor::basis;
pub use fit::{least_squares_fit, weighted_least_squares_fit};
pub use knot::{basis_functions, clamped_uniform_knots, find_span};
