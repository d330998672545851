pub mod aabb;

pub use glam::{dvec3, DVec3};
pub use aabb::Aabb3;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Linear interpolation between two points.
pub fn lerp(a: Point3, b: Point3, alpha: f64) -> Point3 {
    (1.0 - alpha) * a + alpha * b
}
