//! Geometry value types
//!
//! Everything here is a plain `Copy` value with no identity beyond its
//! coordinates.

use std::ops::{Add, Mul, Neg, Sub};

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Z component of the 2D cross product `self × other`
    pub fn perp_dot(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Point extended with depth and a homogeneous component.
///
/// Vertex grids (height maps, parametric surfaces) are tessellated with the
/// same code as flat points; only `x`/`y` take part in orientation tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub fn with_w(mut self, w: f32) -> Self {
        self.w = w;
        self
    }

    /// Drop depth and `w`
    pub const fn xy(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Flatten into `[x, y, z]`, the layout vertex buffers expect
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl From<Point> for Vertex {
    fn from(p: Point) -> Self {
        Vertex::new(p.x, p.y, 0.0)
    }
}

/// Ordered triple of points. The order encodes winding.
pub type Triangle<P = Point> = [P; 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(b - a, Point::new(2.0, -3.0));
        assert_eq!(a * 2.0, Point::new(2.0, 4.0));
        assert_eq!(-a, Point::new(-1.0, -2.0));
    }

    #[test]
    fn perp_dot_sign_follows_turn_direction() {
        let right = Point::new(1.0, 0.0);
        let up = Point::new(0.0, 1.0);
        assert!(right.perp_dot(up) > 0.0);
        assert!(up.perp_dot(right) < 0.0);
        assert_eq!(right.perp_dot(right * 3.0), 0.0);
    }

    #[test]
    fn vertex_round_trips_through_point() {
        let v = Vertex::new(0.5, -0.25, 3.0);
        assert_eq!(v.w, 1.0);
        assert_eq!(v.xy(), Point::new(0.5, -0.25));
        assert_eq!(Vertex::from(v.xy()).z, 0.0);
        assert_eq!(v.with_w(0.0).w, 0.0);
    }

    #[test]
    fn non_finite_points_are_detected() {
        assert!(Point::new(1.0, 1.0).is_finite());
        assert!(!Point::new(f32::NAN, 1.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }
}
