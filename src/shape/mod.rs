//! A dense, three dimensional occupancy grid.

use std::str::FromStr;

use crate::error::{EmptyShapeError, ShapeError};

mod bounds;
mod expander;

pub use bounds::BoundingBox;
pub use expander::Expansions;

/// A polycube, represented as three dimensions and an array of booleans.
///
/// The array of booleans represents the cubes and their presence (if `true`)
/// or absence (if `false`). Cells are stored with `dim_1` varying slowest
/// and `dim_3` varying fastest.
///
/// Two shapes are equal if they have the same dimensions and the same
/// occupancy. No notion of rotation is involved: the same polycube placed
/// in a different orientation is a different [`Shape`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape {
    dim_1: usize,
    dim_2: usize,
    dim_3: usize,
    filled: Vec<bool>,
}

/// Creating a new shape from a triple-nested vector
/// is convenient if/when you're writing them out
/// by hand.
impl TryFrom<Vec<Vec<Vec<bool>>>> for Shape {
    type Error = ShapeError;

    fn try_from(value: Vec<Vec<Vec<bool>>>) -> Result<Self, Self::Error> {
        let dim_1 = value.len();
        let dim_2 = value.first().map(Vec::len).unwrap_or(0);
        let dim_3 = value
            .first()
            .and_then(|layer| layer.first())
            .map(Vec::len)
            .unwrap_or(0);

        let dims = (dim_1, dim_2, dim_3);
        let volume = checked_volume(dims).ok_or(ShapeError::TooLarge { dims })?;

        let mut filled = Vec::new();
        filled
            .try_reserve_exact(volume)
            .map_err(|_| ShapeError::TooLarge { dims })?;

        for layer in value {
            if layer.len() != dim_2 {
                return Err(ShapeError::Ragged);
            }

            for row in layer {
                if row.len() != dim_3 {
                    return Err(ShapeError::Ragged);
                }
                filled.extend(row);
            }
        }

        Ok(Self {
            dim_1,
            dim_2,
            dim_3,
            filled,
        })
    }
}

impl core::fmt::Display for Shape {
    // Format the shape in a somewhat more easy to digest
    // format.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut xy = String::new();

        for _ in 0..self.dim_3 {
            xy.push('-');
        }
        xy.push('\n');

        for x in 0..self.dim_1 {
            for y in 0..self.dim_2 {
                for z in 0..self.dim_3 {
                    if self.is_set(x, y, z) {
                        xy.push('1');
                    } else {
                        xy.push('0');
                    }
                }
                xy.push('\n');
            }

            for _ in 0..self.dim_3 {
                xy.push('-');
            }
            xy.push('\n');
        }

        write!(f, "{}", xy.trim_end())
    }
}

/// Parses the format written by [`Display`](core::fmt::Display): layers along
/// `dim_1` separated by lines of `-`, one line per row along `dim_2`.
impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut layers = Vec::new();
        let mut current: Vec<Vec<bool>> = Vec::new();

        for line in s.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line.chars().all(|c| c == '-') {
                if !current.is_empty() {
                    layers.push(std::mem::take(&mut current));
                }
                continue;
            }

            let row = line
                .chars()
                .map(|c| match c {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    other => Err(ShapeError::Parse(format!("unexpected character `{other}`"))),
                })
                .collect::<Result<Vec<_>, _>>()?;

            current.push(row);
        }

        if !current.is_empty() {
            layers.push(current);
        }

        if layers.is_empty() {
            return Err(ShapeError::Parse("no rows found".to_string()));
        }

        Self::try_from(layers)
    }
}

/// The volume of a grid with dimensions `dims`, if both it and the grid
/// padded by [`Shape::pad_one`] can be addressed.
fn checked_volume((d1, d2, d3): (usize, usize, usize)) -> Option<usize> {
    let volume = |a: usize, b: usize, c: usize| a.checked_mul(b)?.checked_mul(c);

    volume(d1.checked_add(2)?, d2.checked_add(2)?, d3.checked_add(2)?)?;
    volume(d1, d2, d3)
}

impl Shape {
    /// Create a new, empty [`Shape`] with dimensions `(dim_1, dim_2, dim_3)`.
    ///
    /// # Panics
    ///
    /// If the grid cannot be allocated. Use [`Shape::try_new`] for
    /// dimensions that come from user input.
    pub fn new(dim_1: usize, dim_2: usize, dim_3: usize) -> Self {
        match Self::try_new(dim_1, dim_2, dim_3) {
            Ok(shape) => shape,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a new, empty [`Shape`] with dimensions `(dim_1, dim_2, dim_3)`,
    /// failing with [`ShapeError::TooLarge`] if the grid cannot be allocated.
    pub fn try_new(dim_1: usize, dim_2: usize, dim_3: usize) -> Result<Self, ShapeError> {
        let dims = (dim_1, dim_2, dim_3);
        let volume = checked_volume(dims).ok_or(ShapeError::TooLarge { dims })?;

        let mut filled = Vec::new();
        filled
            .try_reserve_exact(volume)
            .map_err(|_| ShapeError::TooLarge { dims })?;
        filled.resize(volume, false);

        Ok(Self {
            dim_1,
            dim_2,
            dim_3,
            filled,
        })
    }

    /// Create a new, empty [`Shape`] with dimensions `(side, side, side)`.
    pub fn new_equal_sides(side: usize) -> Self {
        Self::new(side, side, side)
    }

    /// Create a [`Shape`] from an already laid out occupancy vector.
    pub fn from_filled(
        dim_1: usize,
        dim_2: usize,
        dim_3: usize,
        filled: Vec<bool>,
    ) -> Result<Self, ShapeError> {
        let dims = (dim_1, dim_2, dim_3);
        let expected = checked_volume(dims).ok_or(ShapeError::TooLarge { dims })?;
        if filled.len() != expected {
            return Err(ShapeError::DataLength {
                expected,
                actual: filled.len(),
            });
        }

        Ok(Self {
            dim_1,
            dim_2,
            dim_3,
            filled,
        })
    }

    /// `filled` must hold exactly `dim_1 * dim_2 * dim_3` cells.
    pub(crate) fn new_raw(dim_1: usize, dim_2: usize, dim_3: usize, filled: Vec<bool>) -> Self {
        debug_assert_eq!(filled.len(), dim_1 * dim_2 * dim_3);

        Self {
            dim_1,
            dim_2,
            dim_3,
            filled,
        }
    }

    /// Create the smallest origin-anchored [`Shape`] that has exactly the
    /// provided cells set.
    ///
    /// The result is only cropped if some cell touches each of the
    /// `0` planes; use [`Shape::crop`] afterwards if that matters.
    pub fn from_cells<I>(cells: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = (usize, usize, usize)>,
    {
        let cells: Vec<_> = cells.into_iter().collect();

        let (d1, d2, d3) = cells
            .iter()
            .fold(None, |acc: Option<(usize, usize, usize)>, &(x, y, z)| {
                Some(match acc {
                    Some((mx, my, mz)) => (mx.max(x), my.max(y), mz.max(z)),
                    None => (x, y, z),
                })
            })
            .ok_or(EmptyShapeError)?;

        let too_large = ShapeError::TooLarge {
            dims: (
                d1.saturating_add(1),
                d2.saturating_add(1),
                d3.saturating_add(1),
            ),
        };
        let grow = |d: usize| d.checked_add(1).ok_or(too_large.clone());

        let mut shape = Self::try_new(grow(d1)?, grow(d2)?, grow(d3)?)?;
        for (x, y, z) in cells {
            shape.set(x, y, z)?;
        }

        Ok(shape)
    }

    /// Get the dimensions of this shape
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.dim_1, self.dim_2, self.dim_3)
    }

    /// The amount of cells in the grid, occupied or not.
    pub fn volume(&self) -> usize {
        self.filled.len()
    }

    /// The amount of occupied cells, i.e. the size of the polycube.
    pub fn present_cubes(&self) -> usize {
        self.filled.iter().filter(|v| **v).count()
    }

    /// Calculate the offset into `self.filled` using the provided offsets
    /// within each dimension.
    fn offset(&self, dim_1: usize, dim_2: usize, dim_3: usize) -> Option<usize> {
        if dim_1 < self.dim_1 && dim_2 < self.dim_2 && dim_3 < self.dim_3 {
            Some(self.index(dim_1, dim_2, dim_3))
        } else {
            None
        }
    }

    /// Same as [`Shape::offset`], without the bounds check.
    fn index(&self, dim_1: usize, dim_2: usize, dim_3: usize) -> usize {
        dim_1 * self.dim_2 * self.dim_3 + dim_2 * self.dim_3 + dim_3
    }

    /// Inverse of [`Shape::index`].
    fn coordinate(&self, index: usize) -> (usize, usize, usize) {
        let plane = self.dim_2 * self.dim_3;
        let rem = index % plane;
        (index / plane, rem / self.dim_3, rem % self.dim_3)
    }

    /// Set the state of the box located at `(d1, d2, d3)` to `set`.
    pub fn set_to(&mut self, d1: usize, d2: usize, d3: usize, set: bool) -> Result<(), ShapeError> {
        let idx = self
            .offset(d1, d2, d3)
            .ok_or(ShapeError::OutOfBounds {
                coordinate: (d1, d2, d3),
                dims: self.dims(),
            })?;
        self.filled[idx] = set;
        Ok(())
    }

    /// Set the box located at `(d1, d2, d3)` to be filled.
    pub fn set(&mut self, d1: usize, d2: usize, d3: usize) -> Result<(), ShapeError> {
        self.set_to(d1, d2, d3, true)
    }

    /// Returns whether the box located at `(d1, d2, d3)` is filled.
    ///
    /// Coordinates outside of the grid are never filled.
    pub fn is_set(&self, d1: usize, d2: usize, d3: usize) -> bool {
        self.offset(d1, d2, d3)
            .map(|v| self.filled[v])
            .unwrap_or(false)
    }

    /// The coordinates of all occupied cells, in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.filled
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(idx, _)| self.coordinate(idx))
    }

    pub(crate) fn filled(&self) -> &[bool] {
        &self.filled
    }

    /// Create a new [`Shape`] that has an extra box-space on all sides
    /// of the shape.
    ///
    /// Every constructor checks that the padded grid is addressable.
    pub fn pad_one(&self) -> Shape {
        let mut padded = Shape::new(self.dim_1 + 2, self.dim_2 + 2, self.dim_3 + 2);

        for (d1, d2, d3) in self.occupied() {
            let idx = padded.index(d1 + 1, d2 + 1, d3 + 1);
            padded.filled[idx] = true;
        }

        padded
    }

    /// Check whether this shape is already cropped, i.e. none of
    /// its six outer planes is empty.
    ///
    /// An empty shape is never cropped.
    pub fn is_cropped(&self) -> bool {
        self.bounding_box()
            .map(|bounds| bounds.dims() == self.dims())
            .unwrap_or(false)
    }
}
