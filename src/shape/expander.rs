//! This module implements an iterator that provides all N + 1 expansions
//! for a shape of N.

use super::{BoundingBox, Shape};
use crate::error::EmptyShapeError;

type Cell = (usize, usize, usize);

fn faces((d1, d2, d3): Cell) -> [Cell; 6] {
    [
        (d1 + 1, d2, d3),
        (d1 - 1, d2, d3),
        (d1, d2 + 1, d3),
        (d1, d2 - 1, d3),
        (d1, d2, d3 + 1),
        (d1, d2, d3 - 1),
    ]
}

/// Lazily yields every cropped shape obtained by adding one cell to a padded
/// shape, one per frontier cell.
///
/// Clones traverse independently of each other.
#[derive(Clone, Debug)]
pub struct Expansions {
    padded: Shape,
    bounds: BoundingBox,
    frontier: std::vec::IntoIter<Cell>,
    expected_cubes: usize,
}

impl Expansions {
    fn candidate(padded: &Shape, bounds: &BoundingBox, cell: Cell) -> Shape {
        let mut next = padded.clone();
        let idx = next.index(cell.0, cell.1, cell.2);
        next.filled[idx] = true;
        next.crop_to(&bounds.including(cell))
    }

    #[cfg(feature = "diagnostics")]
    fn check(candidate: &Shape, expected_cubes: usize) {
        if !candidate.is_cropped() {
            tracing::error!(dims = ?candidate.dims(), "expansion produced an uncropped shape");
        }

        let present = candidate.present_cubes();
        if present != expected_cubes {
            tracing::error!(present, expected_cubes, "expansion produced a shape of the wrong size");
        }
    }

    #[cfg(not(feature = "diagnostics"))]
    fn check(_candidate: &Shape, _expected_cubes: usize) {}
}

impl Iterator for Expansions {
    type Item = Shape;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.frontier.next()?;

        let candidate = Self::candidate(&self.padded, &self.bounds, cell);
        Self::check(&candidate, self.expected_cubes);

        tracing::trace!(?cell, dims = ?candidate.dims(), "emitting expansion");

        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frontier.size_hint()
    }
}

impl ExactSizeIterator for Expansions {}

impl std::iter::FusedIterator for Expansions {}

impl Shape {
    /// Collect the frontier of an already padded shape: every empty cell
    /// sharing a face with an occupied one, in scan order.
    fn padded_frontier(padded: &Shape) -> Vec<Cell> {
        let mut is_frontier = vec![false; padded.volume()];

        for cell in padded.occupied() {
            for (d1, d2, d3) in faces(cell) {
                let idx = padded.index(d1, d2, d3);
                if !padded.filled[idx] {
                    is_frontier[idx] = true;
                }
            }
        }

        is_frontier
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(idx, _)| padded.coordinate(idx))
            .collect()
    }

    /// The frontier of this shape: all empty cells that share a face with
    /// at least one occupied cell, each listed once.
    ///
    /// Frontier cells may lie just outside of `self`, so the coordinates are
    /// given in the coordinate system of [`Shape::pad_one`], where `(d1, d2, d3)`
    /// of `self` is `(d1 + 1, d2 + 1, d3 + 1)`.
    pub fn frontier(&self) -> Vec<(usize, usize, usize)> {
        Self::padded_frontier(&self.pad_one())
    }

    /// Produce an iterator over all shapes that have exactly one more cell
    /// than `self`, one for each cell in the frontier. Every yielded shape
    /// is cropped.
    ///
    /// No deduplication happens: rotations or reflections of the same
    /// polycube are all yielded.
    pub fn expand(&self) -> Result<Expansions, EmptyShapeError> {
        let inner = self.bounding_box()?;
        let padded = self.pad_one();
        let bounds = BoundingBox {
            min: (inner.min.0 + 1, inner.min.1 + 1, inner.min.2 + 1),
            max: (inner.max.0 + 1, inner.max.1 + 1, inner.max.2 + 1),
        };
        let frontier = Self::padded_frontier(&padded);
        let expected_cubes = padded.present_cubes() + 1;

        tracing::debug!(
            dims = ?self.dims(),
            cubes = expected_cubes - 1,
            frontier = frontier.len(),
            "expanding shape"
        );

        Ok(Expansions {
            padded,
            bounds,
            frontier: frontier.into_iter(),
            expected_cubes,
        })
    }

    /// Same as [`Shape::expand`], but builds all candidates up front
    /// using rayon. The order of the result matches that of [`Shape::expand`].
    pub fn expand_par(&self) -> Result<Vec<Shape>, EmptyShapeError> {
        use rayon::prelude::*;

        let Expansions {
            padded,
            bounds,
            frontier,
            expected_cubes,
        } = self.expand()?;

        let frontier: Vec<_> = frontier.collect();

        Ok(frontier
            .into_par_iter()
            .map(|cell| {
                let candidate = Expansions::candidate(&padded, &bounds, cell);
                Expansions::check(&candidate, expected_cubes);
                candidate
            })
            .collect())
    }
}
