//! Bounding boxes and cropping.

use super::Shape;
use crate::error::EmptyShapeError;

/// The inclusive, axis aligned region of a [`Shape`] that contains
/// all of its occupied cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: (usize, usize, usize),
    pub max: (usize, usize, usize),
}

impl BoundingBox {
    /// A bounding box containing only `cell`.
    pub fn new(cell: (usize, usize, usize)) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    /// The dimensions of a grid spanning exactly this box.
    pub fn dims(&self) -> (usize, usize, usize) {
        (
            self.max.0 - self.min.0 + 1,
            self.max.1 - self.min.1 + 1,
            self.max.2 - self.min.2 + 1,
        )
    }

    pub fn contains(&self, (d1, d2, d3): (usize, usize, usize)) -> bool {
        (self.min.0..=self.max.0).contains(&d1)
            && (self.min.1..=self.max.1).contains(&d2)
            && (self.min.2..=self.max.2).contains(&d3)
    }

    /// The smallest box containing both `self` and `cell`.
    pub fn including(mut self, (d1, d2, d3): (usize, usize, usize)) -> Self {
        self.min = (self.min.0.min(d1), self.min.1.min(d2), self.min.2.min(d3));
        self.max = (self.max.0.max(d1), self.max.1.max(d2), self.max.2.max(d3));
        self
    }
}

impl Shape {
    /// Compute the bounding box of the occupied cells of this shape.
    pub fn bounding_box(&self) -> Result<BoundingBox, EmptyShapeError> {
        let mut occupied = self.occupied();
        let first = occupied.next().ok_or(EmptyShapeError)?;

        Ok(occupied.fold(BoundingBox::new(first), BoundingBox::including))
    }

    /// Create a new [`Shape`] representing `self` but cropped.
    ///
    /// Cropping means that there are no planes without any present boxes.
    /// Cropping an already cropped shape returns an identical shape.
    pub fn crop(&self) -> Result<Shape, EmptyShapeError> {
        let bounds = self.bounding_box()?;
        Ok(self.crop_to(&bounds))
    }

    /// Copy the region described by `bounds` into a new [`Shape`] whose
    /// origin is `bounds.min`.
    ///
    /// `bounds` must lie within `self`.
    pub(crate) fn crop_to(&self, bounds: &BoundingBox) -> Shape {
        let (dim_1, dim_2, dim_3) = bounds.dims();
        let (o1, o2, o3) = bounds.min;

        let mut filled = Vec::with_capacity(dim_1 * dim_2 * dim_3);

        for d1 in o1..o1 + dim_1 {
            for d2 in o2..o2 + dim_2 {
                let start = self.index(d1, d2, o3);
                filled.extend_from_slice(&self.filled[start..start + dim_3]);
            }
        }

        Shape {
            dim_1,
            dim_2,
            dim_3,
            filled,
        }
    }
}

#[test]
fn including_grows_both_ends() {
    let bounds = BoundingBox::new((2, 2, 2))
        .including((0, 3, 2))
        .including((1, 1, 5));

    assert_eq!(bounds.min, (0, 1, 2));
    assert_eq!(bounds.max, (2, 3, 5));
    assert_eq!(bounds.dims(), (3, 3, 4));
    assert!(bounds.contains((1, 2, 3)));
    assert!(!bounds.contains((3, 2, 3)));
}
