//! Closed Lane–Riesenfeld subdivision curve.

use log::debug;
use pcurve_core::traits::{BoundingBox, Validate};
use pcurve_core::{CurveError, Result};
use pcurve_math::{lerp, Aabb3, Point3};
use serde::{Deserialize, Serialize};

use super::{check_order, Curve, Evaluation};

/// Upper bound on the refined buffer length.
const MAX_BUFFER_LEN: usize = 1 << 24;

/// Construction inputs of a [`SubdivisionCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdivisionCurveParams {
    pub control_points: Vec<Point3>,
    pub degree: usize,
}

/// A closed curve obtained by Lane–Riesenfeld refinement of a control polygon,
/// parameterized over `[0, 1]`.
///
/// Each of the `degree` refinement rounds doubles the polygon by midpoint
/// insertion and then applies `degree - 1` averaging passes. The refined
/// buffer is computed once and evaluated by piecewise-linear lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SubdivisionCurveParams", into = "SubdivisionCurveParams")]
pub struct SubdivisionCurve {
    control_points: Vec<Point3>,
    degree: usize,
    subdivided: Vec<Point3>,
}

impl SubdivisionCurve {
    pub fn new(control_points: Vec<Point3>, degree: usize) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(CurveError::InvalidArgument(format!(
                "subdivision curve needs at least 2 control points, got {}",
                control_points.len()
            )));
        }
        let refined_len = u32::try_from(degree)
            .ok()
            .and_then(|d| 1usize.checked_shl(d))
            .and_then(|factor| factor.checked_mul(control_points.len()))
            .filter(|&len| len <= MAX_BUFFER_LEN);
        if refined_len.is_none() {
            return Err(CurveError::InvalidArgument(format!(
                "subdivision degree {degree} on {} control points exceeds {MAX_BUFFER_LEN} refined points",
                control_points.len()
            )));
        }

        let subdivided = lane_riesenfeld(&control_points, degree);
        debug!(
            "subdivision curve: {} control points, degree {}, {} refined points",
            control_points.len(),
            degree,
            subdivided.len()
        );

        Ok(Self {
            control_points,
            degree,
            subdivided,
        })
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Number of refinement rounds.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The refined, explicitly closed point buffer.
    pub fn subdivided_points(&self) -> &[Point3] {
        &self.subdivided
    }
}

/// Refine a closed polygon `degree` times.
fn lane_riesenfeld(control_points: &[Point3], degree: usize) -> Vec<Point3> {
    let mut points = control_points.to_vec();

    for _ in 0..degree {
        let mut refined = insert_midpoints(&points);
        for _ in 1..degree {
            refined = average_with_predecessor(&refined);
        }
        points = refined;
    }

    if points.len() > 1 {
        let first = points[0];
        if let Some(last) = points.last_mut() {
            *last = first;
        }
    }

    points
}

/// Keep every point and insert the midpoint to its cyclic successor.
fn insert_midpoints(points: &[Point3]) -> Vec<Point3> {
    let n = points.len();
    (0..n)
        .flat_map(|i| {
            let next = points[(i + 1) % n];
            [points[i], (points[i] + next) * 0.5]
        })
        .collect()
}

/// Replace every point with the average of itself and its cyclic predecessor.
fn average_with_predecessor(points: &[Point3]) -> Vec<Point3> {
    let n = points.len();
    (0..n)
        .map(|i| (points[i] + points[(i + n - 1) % n]) * 0.5)
        .collect()
}

impl Curve for SubdivisionCurve {
    /// Linear interpolation in the refined buffer. The first derivative is the
    /// central difference `(next - prev) / 2` around the lower buffer index and
    /// does not depend on the position within the segment.
    ///
    /// Parameters outside `[0, 1]` wrap.
    fn evaluate(&self, t: f64, order: usize) -> Result<Evaluation> {
        check_order("SubdivisionCurve", order, self.max_order())?;
        let t = self.normalize_parameter(t)?;

        let points = &self.subdivided;
        let size = points.len();
        let scaled = t * (size - 1) as f64;
        let base = scaled.floor();
        let alpha = scaled - base;
        let index = base as usize % size;
        let next = (index + 1) % size;

        let mut eval = Evaluation::new(lerp(points[index], points[next], alpha), order);
        if order >= 1 {
            let prev = (index + size - 1) % size;
            eval.push_derivative((points[next] - points[prev]) * 0.5);
        }
        Ok(eval)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn max_order(&self) -> usize {
        1
    }

    fn is_closed(&self) -> bool {
        true
    }
}

impl Validate for SubdivisionCurve {
    fn validate(&self) -> Result<()> {
        match (self.subdivided.first(), self.subdivided.last()) {
            (Some(first), Some(last)) if first == last => Ok(()),
            (Some(_), Some(_)) => Err(CurveError::Validation(
                "subdivided buffer is not closed".into(),
            )),
            _ => Err(CurveError::Validation("subdivided buffer is empty".into())),
        }
    }
}

impl BoundingBox for SubdivisionCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        Aabb3::from_points(&self.subdivided)
            .map(Into::into)
            .unwrap_or_default()
    }
}

impl TryFrom<SubdivisionCurveParams> for SubdivisionCurve {
    type Error = CurveError;

    fn try_from(params: SubdivisionCurveParams) -> Result<Self> {
        Self::new(params.control_points, params.degree)
    }
}

impl From<SubdivisionCurve> for SubdivisionCurveParams {
    fn from(curve: SubdivisionCurve) -> Self {
        Self {
            control_points: curve.control_points,
            degree: curve.degree,
        }
    }
}
