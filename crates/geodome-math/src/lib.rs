#![warn(missing_docs)]

//! Math types for geodome.
//!
//! Thin wrappers around nalgebra providing the points, vectors and
//! tolerance constants used to build and measure geodesic spheres,
//! plus the closed-form values of the ideal sphere they approximate.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = nalgebra::Vector3<f64>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Absolute distance floor.
    pub linear: f64,
    /// Tolerance as a fraction of the model scale (usually the sphere radius).
    pub relative: f64,
}

impl Tolerance {
    /// Default tolerances (1e-12 absolute, 1e-9 relative).
    pub const DEFAULT: Self = Self {
        linear: 1e-12,
        relative: 1e-9,
    };

    /// Effective distance tolerance for a model of the given scale.
    pub fn at_scale(&self, scale: f64) -> f64 {
        (self.relative * scale.abs()).max(self.linear)
    }

    /// Check if two points are coincident at the given scale.
    pub fn points_equal(&self, a: &Point3, b: &Point3, scale: f64) -> bool {
        (a - b).norm() < self.at_scale(scale)
    }

    /// Check if a point lies on the sphere of `radius` centered at the origin.
    pub fn on_sphere(&self, p: &Point3, radius: f64) -> bool {
        (p.coords.norm() - radius).abs() < self.at_scale(radius)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scale `p` along the ray from the origin so it lies on the sphere of `radius`.
///
/// Returns `None` for points at (or numerically at) the origin, which have
/// no radial direction.
pub fn project_to_sphere(p: &Point3, radius: f64) -> Option<Point3> {
    let len = p.coords.norm();
    if len <= f64::EPSILON {
        return None;
    }
    Some(Point3::from(p.coords * (radius / len)))
}

/// Area of triangle `abc`: half the magnitude of `(b - a) × (c - a)`.
pub fn triangle_area(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    (b - a).cross(&(c - a)).norm() / 2.0
}

/// Signed volume of the tetrahedron spanned by the origin and triangle `abc`.
///
/// Positive when `abc` winds counter-clockwise seen from outside the origin.
pub fn signed_volume(a: &Point3, b: &Point3, c: &Point3) -> f64 {
    a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
}

/// Isoperimetric quotient `36πV²/S³`.
///
/// Equals 1 for a sphere and is strictly smaller for every other closed
/// surface. Returns 0 for a zero surface area.
pub fn isoperimetric_quotient(surface_area: f64, volume: f64) -> f64 {
    if surface_area <= 0.0 {
        return 0.0;
    }
    36.0 * PI * volume * volume / surface_area.powi(3)
}

/// Closed-form measurements of the ideal sphere of a given radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereReference {
    /// Sphere radius.
    pub radius: f64,
}

impl SphereReference {
    /// Reference sphere of `radius`.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Surface area `4πr²`.
    pub fn surface_area(&self) -> f64 {
        4.0 * PI * self.radius * self.radius
    }

    /// Enclosed volume `(4/3)πr³`.
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_to_sphere() {
        let p = Point3::new(3.0, 4.0, 0.0);
        let q = project_to_sphere(&p, 10.0).unwrap();
        assert_relative_eq!(q.x, 6.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 8.0, epsilon = 1e-12);
        assert_relative_eq!(q.coords.norm(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_origin() {
        assert!(project_to_sphere(&Point3::origin(), 1.0).is_none());
    }

    #[test]
    fn test_triangle_area() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(2.0, 0.0, 0.0);
        let c = Point3::new(0.0, 3.0, 0.0);
        assert_relative_eq!(triangle_area(&a, &b, &c), 3.0, epsilon = 1e-12);
        // Collinear points
        let d = Point3::new(4.0, 0.0, 0.0);
        assert_eq!(triangle_area(&a, &b, &d), 0.0);
    }

    #[test]
    fn test_signed_volume_orientation() {
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 1.0, 0.0);
        let c = Point3::new(0.0, 0.0, 1.0);
        // Unit corner tetrahedron: 1/6, positive for outward (CCW) winding.
        assert_relative_eq!(signed_volume(&a, &b, &c), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(signed_volume(&a, &c, &b), -1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_reference() {
        let s = SphereReference::new(10.0);
        assert_relative_eq!(s.surface_area(), 1256.6370614359173, epsilon = 1e-9);
        assert_relative_eq!(s.volume(), 4188.790204786391, epsilon = 1e-9);
        assert_relative_eq!(
            isoperimetric_quotient(s.surface_area(), s.volume()),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_isoperimetric_quotient_cube() {
        // Unit cube: 36π / 216 = π/6
        assert_relative_eq!(isoperimetric_quotient(6.0, 1.0), PI / 6.0, epsilon = 1e-12);
        assert_eq!(isoperimetric_quotient(0.0, 1.0), 0.0);
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::DEFAULT;
        assert_relative_eq!(tol.at_scale(10.0), 1e-8, epsilon = 1e-20);
        assert_eq!(tol.at_scale(0.0), 1e-12);
        let p = Point3::new(0.0, 0.0, 10.0 + 1e-10);
        assert!(tol.on_sphere(&p, 10.0));
        let q = Point3::new(0.0, 0.0, 10.001);
        assert!(!tol.on_sphere(&q, 10.0));
        assert!(tol.points_equal(&p, &Point3::new(0.0, 0.0, 10.0), 10.0));
    }
}
