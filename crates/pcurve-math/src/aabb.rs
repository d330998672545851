use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb3 {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point3]) -> Option<Self> {
        let (&first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Containment test with the box grown by `eps` on every side.
    pub fn contains_point(&self, p: Point3, eps: f64) -> bool {
        p.cmpge(self.min - Vector3::splat(eps)).all() && p.cmple(self.max + Vector3::splat(eps)).all()
    }
}

impl From<Aabb3> for (Point3, Point3) {
    fn from(aabb: Aabb3) -> Self {
        (aabb.min, aabb.max)
    }
}
