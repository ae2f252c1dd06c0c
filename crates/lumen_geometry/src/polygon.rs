//! Polygon helpers: area, winding and containment.
//!
//! Coordinates are y-up (clip space), so a positive signed area means a
//! counter-clockwise outline.

use lumen_core::{Point, Triangle};

/// Rotational direction of an outline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }
}

/// Axis-aligned rectangle as a clockwise outline, ready for ear clipping.
pub fn rect_polygon(x0: f32, y0: f32, x1: f32, y1: f32) -> [Point; 4] {
    let left = x0.min(x1);
    let right = x0.max(x1);
    let bottom = y0.min(y1);
    let top = y0.max(y1);
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}

/// Shoelace area, positive for counter-clockwise outlines
pub fn signed_area(poly: &[Point]) -> f32 {
    if poly.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0f32;
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

pub fn polygon_area(poly: &[Point]) -> f32 {
    signed_area(poly).abs()
}

/// Winding of `poly`, or `None` when it encloses no area
pub fn winding(poly: &[Point]) -> Option<Winding> {
    let area = signed_area(poly);
    if area > 0.0 {
        Some(Winding::CounterClockwise)
    } else if area < 0.0 {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

/// Reverse `poly` in place if it does not already wind as `target`.
///
/// Returns `true` when the outline was reversed.
pub fn orient(poly: &mut [Point], target: Winding) -> bool {
    match winding(poly) {
        Some(current) if current != target => {
            poly.reverse();
            true
        }
        _ => false,
    }
}

/// Total unsigned area of a triangle list
pub fn triangles_area(triangles: &[Triangle]) -> f32 {
    triangles.iter().map(|t| polygon_area(t)).sum()
}

/// Even-odd containment test
pub fn point_in_polygon(p: Point, poly: &[Point]) -> bool {
    if poly.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = poly.len() - 1;
    for i in 0..poly.len() {
        let pi = poly[i];
        let pj = poly[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let crossing = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < crossing {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_is_clockwise_with_expected_area() {
        let poly = rect_polygon(2.0, 1.0, 0.0, 0.0);
        assert_eq!(winding(&poly), Some(Winding::Clockwise));
        assert!((polygon_area(&poly) - 2.0).abs() < 1e-5);
        assert!(point_in_polygon(Point::new(1.0, 0.5), &poly));
        assert!(!point_in_polygon(Point::new(3.0, 0.5), &poly));
    }

    #[test]
    fn orient_reverses_only_when_needed() {
        let mut poly = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        assert_eq!(winding(&poly), Some(Winding::CounterClockwise));
        assert!(orient(&mut poly, Winding::Clockwise));
        assert_eq!(winding(&poly), Some(Winding::Clockwise));
        assert!(!orient(&mut poly, Winding::Clockwise));
    }

    #[test]
    fn degenerate_outline_has_no_winding() {
        let line = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert_eq!(winding(&line), None);
        assert_eq!(winding(&line[..2]), None);

        let mut copy = line;
        assert!(!orient(&mut copy, Winding::Clockwise));
        assert_eq!(copy, line);
    }

    #[test]
    fn contains_handles_slanted_edges() {
        let poly = vec![
            Point::new(-1.0, -1.0),
            Point::new(3.0, -1.0),
            Point::new(2.0, 1.0),
            Point::new(-2.0, 1.0),
        ];
        assert!(point_in_polygon(Point::new(1.0, 0.0), &poly));
        assert!(!point_in_polygon(Point::new(2.9, 0.9), &poly));
    }

    #[test]
    fn winding_reversal_is_an_involution() {
        assert_eq!(Winding::Clockwise.reversed(), Winding::CounterClockwise);
        assert_eq!(Winding::Clockwise.reversed().reversed(), Winding::Clockwise);
    }
}
