//! lumen_geometry
//!
//! Turns outlines and point grids into triangles a rasterizer can draw.
//!
//! - [`triangulate`]: ear clipping for simple polygons and direct grid
//!   tessellation
//! - [`polygon`]: area, winding and containment helpers
//! - [`coordinate`]: canvas pixel / clip-space mapping

pub mod coordinate;
pub mod error;
pub mod polygon;
pub mod triangulate;

pub use coordinate::{Quadrant, Viewport};
pub use error::{GeometryError, Result};
pub use polygon::Winding;
pub use triangulate::{combine, cross_product, in_triangle, resolve, triangulate};
