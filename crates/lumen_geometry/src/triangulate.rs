//! Polygon triangulation
//!
//! Two tessellators live here:
//!
//! - [`resolve`] / [`triangulate`]: ear clipping for a simple polygon, using
//!   only the input vertices (no Steiner points)
//! - [`combine`]: index arithmetic for row-major point grids
//!
//! Both orientation and containment reduce to [`cross_product`]. Ear
//! clipping expects the outline in **clockwise** order (y up); reverse a
//! counter-clockwise outline with [`crate::polygon::orient`] first.

use lumen_core::{Point, Triangle};
use tracing::{debug, trace};

use crate::error::{GeometryError, Result};

/// Z component of `(p2 - p1) × (p3 - p1)`.
///
/// Positive when `p3` lies counter-clockwise (left) of `p1 → p2`, negative
/// when clockwise (right), zero when the three points are collinear.
#[inline]
pub fn cross_product(p1: Point, p2: Point, p3: Point) -> f32 {
    (p2 - p1).perp_dot(p3 - p1)
}

/// Cross product of a triangle's own edges; its sign is the winding.
#[inline]
pub fn triangle_cross([a, b, c]: &Triangle) -> f32 {
    cross_product(*a, *b, *c)
}

/// Whether `p` lies strictly inside `triangle`.
///
/// Points on an edge or on a vertex are outside. Works for either winding.
pub fn in_triangle(p: Point, [a, b, c]: &Triangle) -> bool {
    let ab = cross_product(p, *a, *b);
    let bc = cross_product(p, *b, *c);
    let ca = cross_product(p, *c, *a);

    (ab > 0.0 && bc > 0.0 && ca > 0.0) || (ab < 0.0 && bc < 0.0 && ca < 0.0)
}

/// Ear-clip `polygon` in place.
///
/// Returns `len - 2` triangles for a simple clockwise polygon. Every
/// clipped vertex is removed from `polygon`, so on success only the three
/// vertices of the final triangle remain. Clone the outline first if its
/// order is needed afterwards, or use [`triangulate`].
///
/// On error the polygon is left untouched.
pub fn resolve(polygon: &mut Vec<Point>) -> Result<Vec<Triangle>> {
    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    let ears = clip_ears(polygon.as_slice(), &mut remaining)?;

    let triangles = ears
        .iter()
        .map(|ear| ear.map(|i| polygon[i]))
        .collect();

    // `remaining` only ever shrinks, so it is still ascending.
    let mut kept = remaining.into_iter().peekable();
    let mut index = 0;
    polygon.retain(|_| {
        let keep = kept.peek() == Some(&index);
        if keep {
            kept.next();
        }
        index += 1;
        keep
    });

    Ok(triangles)
}

/// Ear-clip without touching the input.
///
/// Returns triangles as index triples into `polygon`.
pub fn triangulate(polygon: &[Point]) -> Result<Vec<[usize; 3]>> {
    let mut remaining: Vec<usize> = (0..polygon.len()).collect();
    clip_ears(polygon, &mut remaining)
}

/// Tessellate a row-major grid with `row_width` columns.
///
/// Every point outside the first row and the last column spans two
/// triangles with its upper neighbours, giving `2·(w−1)·(h−1)` triangles.
/// Point grids (height maps, parametric surfaces) go straight through
/// without ear clipping.
pub fn combine<P: Copy>(points: &[P], row_width: usize) -> Result<Vec<Triangle<P>>> {
    if row_width < 2 || points.len() % row_width != 0 {
        return Err(GeometryError::InvalidGrid {
            points: points.len(),
            row_width,
        });
    }

    let rows = points.len() / row_width;
    let mut triangles = Vec::with_capacity(2 * (row_width - 1) * rows.saturating_sub(1));

    for i in row_width..points.len() {
        if (i + 1) % row_width == 0 {
            continue;
        }
        let above = i - row_width;
        triangles.push([points[i], points[above], points[above + 1]]);
        triangles.push([points[i], points[i + 1], points[above + 1]]);
    }

    Ok(triangles)
}

/// Shared ear-clipping loop over an index list.
///
/// `remaining` holds the live vertex indices into `points`; clipped
/// vertices are removed from it.
fn clip_ears(points: &[Point], remaining: &mut Vec<usize>) -> Result<Vec<[usize; 3]>> {
    if remaining.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            count: remaining.len(),
        });
    }

    let mut ears = Vec::with_capacity(remaining.len() - 2);
    let mut index = 0;
    let mut misses = 0;

    loop {
        let len = remaining.len();
        let (a, b, c) = (index % len, (index + 1) % len, (index + 2) % len);
        let candidate = [remaining[a], remaining[b], remaining[c]];

        if len <= 3 {
            ears.push(candidate);
            debug!(triangles = ears.len(), "polygon triangulated");
            return Ok(ears);
        }

        if is_ear(points, remaining, candidate) {
            trace!(?candidate, "clipped ear");
            ears.push(candidate);
            remaining.remove(b);
            misses = 0;
            // Stay on the same anchor vertex; it shifts down when the
            // removed vertex wrapped around to slot 0.
            index = if b < a { a - 1 } else { a };
        } else {
            misses += 1;
            if misses >= len {
                debug!(remaining = len, "no ear left to clip");
                return Err(GeometryError::NoEar { remaining: len });
            }
            index = (a + 1) % len;
        }
    }
}

fn is_ear(points: &[Point], remaining: &[usize], candidate: [usize; 3]) -> bool {
    let triangle = candidate.map(|i| points[i]);

    if triangle_cross(&triangle) >= 0.0 {
        return false;
    }

    remaining
        .iter()
        .filter(|&&i| !candidate.contains(&i))
        .all(|&i| !in_triangle(points[i], &triangle))
}
