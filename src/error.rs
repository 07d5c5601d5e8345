use thiserror::Error;

/// Returned when a bounding box is requested for a shape that has no
/// occupied cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shape has no occupied cells")]
pub struct EmptyShapeError;

/// Errors produced while building or converting a [`Shape`](crate::Shape).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("coordinate {coordinate:?} is outside of a shape with dimensions {dims:?}")]
    OutOfBounds {
        coordinate: (usize, usize, usize),
        dims: (usize, usize, usize),
    },

    #[error("expected {expected} cells, got {actual}")]
    DataLength { expected: usize, actual: usize },

    #[error("nested rows and layers do not all have the same length")]
    Ragged,

    #[error("dimensions {dims:?} do not fit in a packed shape")]
    TooLarge { dims: (usize, usize, usize) },

    #[error("invalid shape text: {0}")]
    Parse(String),

    #[error(transparent)]
    Empty(#[from] EmptyShapeError),
}
