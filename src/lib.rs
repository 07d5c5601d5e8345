//! Growth step of polycube enumeration: add one cube to a shape in every
//! possible position, and trim the results to their bounding box.

#[cfg(test)]
mod test;

pub mod error;
pub mod packing;
pub mod shape;

pub use error::{EmptyShapeError, ShapeError};
pub use packing::PackedShape;
pub use shape::{BoundingBox, Expansions, Shape};

/// Trim all empty outer planes from `shape`.
pub fn crop(shape: &Shape) -> Result<Shape, EmptyShapeError> {
    shape.crop()
}

/// Lazily produce every cropped shape that has one more cube than `shape`.
///
/// See [`Shape::expand`].
pub fn expand(shape: &Shape) -> Result<Expansions, EmptyShapeError> {
    shape.expand()
}
