//! Geometry error types

use thiserror::Error;

/// Errors raised while triangulating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer than three points were supplied
    #[error("polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    /// A full pass found no clippable ear. The outline is counter-clockwise,
    /// self-intersecting or degenerate.
    #[error("no ear found among {remaining} remaining vertices (polygon must be simple and clockwise)")]
    NoEar { remaining: usize },

    /// Point count and row width do not describe a grid
    #[error("{points} points do not form a grid with rows of {row_width}")]
    InvalidGrid { points: usize, row_width: usize },
}

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;
