//! Half-space planes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Tolerance used when deciding whether two planes are the same plane.
///
/// Vertices on one face often carry normals and distances that differ only
/// in the last few bits.
pub const PLANE_EPSILON: f64 = 1e-8;

/// A plane bounding a convex solid.
///
/// The solid lies on the side where `dot(p, normal) <= dist`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing out of the solid.
    pub normal: DVec3,

    /// Signed distance from the origin along `normal`.
    pub dist: f64,
}

impl Plane {
    pub const fn new(normal: DVec3, dist: f64) -> Self {
        Self { normal, dist }
    }

    /// Build the plane with the given normal that passes through `point`.
    pub fn from_point_normal(point: DVec3, normal: DVec3) -> Self {
        Self {
            normal,
            dist: point.dot(normal),
        }
    }

    /// Signed distance of `point` from the plane. Positive is outside.
    #[inline]
    pub fn distance_to(&self, point: DVec3) -> f64 {
        point.dot(self.normal) - self.dist
    }

    /// Check if `point` lies in the half-space (on or behind the plane).
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        self.distance_to(point) <= 0.0
    }

    /// Compare normal (component-wise) and distance within `epsilon`.
    pub fn approx_eq(&self, other: &Plane, epsilon: f64) -> bool {
        (self.dist - other.dist).abs() < epsilon && self.normal.abs_diff_eq(other.normal, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_sides() {
        let floor = Plane::new(DVec3::Y, 10.0);
        assert!(floor.contains(DVec3::new(0.0, 5.0, 0.0)));
        assert!(floor.contains(DVec3::new(3.0, 10.0, -7.0)));
        assert!(!floor.contains(DVec3::new(0.0, 10.5, 0.0)));
        assert_eq!(floor.distance_to(DVec3::new(1.0, 12.0, 1.0)), 2.0);
    }

    #[test]
    fn test_from_point_normal() {
        let plane = Plane::from_point_normal(DVec3::new(4.0, 2.0, 0.0), DVec3::X);
        assert_eq!(plane.dist, 4.0);
        assert_eq!(plane.distance_to(DVec3::new(4.0, -100.0, 9.0)), 0.0);
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = Plane::new(DVec3::new(0.0, 1.0, 0.0), 32.0);
        let b = Plane::new(DVec3::new(1e-10, 1.0 - 1e-10, 0.0), 32.0 + 1e-9);
        let c = Plane::new(DVec3::new(0.0, 1.0, 0.0), 32.001);

        assert!(a.approx_eq(&b, PLANE_EPSILON));
        assert!(!a.approx_eq(&c, PLANE_EPSILON));
    }
}
