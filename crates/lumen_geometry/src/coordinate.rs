//! Canvas coordinate mapping.
//!
//! Clip space spans `-1..1` on both axes with the origin at the canvas
//! centre and y pointing up. CSS pixels start at the top-left corner with y
//! pointing down.

use lumen_core::Point;

/// Axis distance under which a pointer counts as touching a point
pub const PICK_TOLERANCE: f32 = 0.02;

/// One of the four clip-space quadrants, counted counter-clockwise from
/// the top right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quadrant {
    First,
    Second,
    Third,
    Fourth,
}

impl Quadrant {
    /// Map `1..=4` to a quadrant
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Quadrant::First),
            2 => Some(Quadrant::Second),
            3 => Some(Quadrant::Third),
            4 => Some(Quadrant::Fourth),
            _ => None,
        }
    }

    fn signs(self) -> (f32, f32) {
        match self {
            Quadrant::First => (1.0, 1.0),
            Quadrant::Second => (-1.0, 1.0),
            Quadrant::Third => (-1.0, -1.0),
            Quadrant::Fourth => (1.0, -1.0),
        }
    }
}

/// Drawing surface size in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. Clip space is square, so a non-square canvas
    /// stretches one axis by this factor.
    pub fn ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Convert pixel extents to clip-space extents
    pub fn px_to_clip(&self, w: f32, h: f32) -> (f32, f32) {
        (w / (self.width / 2.0), h / (self.height / 2.0))
    }

    /// Scale y by the aspect ratio so equal clip lengths look equal on screen
    pub fn accept_ratio(&self, points: &[Point]) -> Vec<Point> {
        let ratio = self.ratio();
        points.iter().map(|p| Point::new(p.x, p.y * ratio)).collect()
    }

    /// Map a CSS client position to clip space.
    ///
    /// `canvas_origin` is the canvas's top-left corner in client
    /// coordinates.
    pub fn screen_to_clip(&self, client: Point, canvas_origin: Point) -> Point {
        let css = client - canvas_origin;
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        let x = -half_w + css.x;
        let y = half_h - css.y;
        Point::new(x / half_w, y / half_h)
    }
}

/// Reflect `point` into `quadrant`, keeping its distance from each axis
pub fn quadrant_change(point: Point, quadrant: Quadrant) -> Point {
    let (sx, sy) = quadrant.signs();
    Point::new(point.x.abs() * sx, point.y.abs() * sy)
}

/// Whether `pointer` is within [`PICK_TOLERANCE`] of `point` on both axes
pub fn approaches(point: Point, pointer: Point) -> bool {
    approaches_within(point, pointer, PICK_TOLERANCE)
}

pub fn approaches_within(point: Point, pointer: Point, tolerance: f32) -> bool {
    (point.x - pointer.x).abs() <= tolerance && (point.y - pointer.y).abs() <= tolerance
}
