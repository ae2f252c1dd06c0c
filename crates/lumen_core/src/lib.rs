//! Lumen Core
//!
//! Value types shared by the Lumen crates:
//!
//! - **Points**: 2D [`Point`] used by the triangulator and coordinate helpers
//! - **Vertices**: [`Vertex`] with optional depth and homogeneous components
//! - **Triangles**: ordered triples whose order encodes winding
//! - **Curves**: closed-form generators in [`math`]
//!
//! # Example
//!
//! ```rust
//! use lumen_core::{math, Point};
//!
//! let line = math::linear(0.0, 0.0, 2.0, 1.0);
//! assert_eq!(line(4.0), 2.0);
//!
//! let p = Point::new(1.0, 2.0);
//! assert_eq!(p + Point::new(1.0, 1.0), Point::new(2.0, 3.0));
//! ```

pub mod geometry;
pub mod math;

pub use geometry::{Point, Triangle, Vertex};
