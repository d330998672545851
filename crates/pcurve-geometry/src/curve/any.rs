//! A single value type over every curve variant.

use pcurve_core::Result;
use serde::{Deserialize, Serialize};

use super::{Curve, Evaluation, QuadraticBSpline, SubdivisionCurve, TorusKnot};

/// Any of the supported curves, selected at construction.
///
/// Serializes as the variant's construction inputs tagged with `kind`;
/// deserializing rebuilds the curve and rejects invalid inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnyCurve {
    Subdivision(SubdivisionCurve),
    #[serde(rename = "bspline")]
    BSpline(QuadraticBSpline),
    TorusKnot(TorusKnot),
}

impl AnyCurve {
    fn inner(&self) -> &dyn Curve {
        match self {
            AnyCurve::Subdivision(c) => c,
            AnyCurve::BSpline(c) => c,
            AnyCurve::TorusKnot(c) => c,
        }
    }
}

impl Curve for AnyCurve {
    fn evaluate(&self, t: f64, order: usize) -> Result<Evaluation> {
        self.inner().evaluate(t, order)
    }

    fn domain(&self) -> (f64, f64) {
        self.inner().domain()
    }

    fn max_order(&self) -> usize {
        self.inner().max_order()
    }

    fn is_closed(&self) -> bool {
        self.inner().is_closed()
    }
}

impl From<SubdivisionCurve> for AnyCurve {
    fn from(curve: SubdivisionCurve) -> Self {
        AnyCurve::Subdivision(curve)
    }
}

impl From<QuadraticBSpline> for AnyCurve {
    fn from(curve: QuadraticBSpline) -> Self {
        AnyCurve::BSpline(curve)
    }
}

impl From<TorusKnot> for AnyCurve {
    fn from(curve: TorusKnot) -> Self {
        AnyCurve::TorusKnot(curve)
    }
}
