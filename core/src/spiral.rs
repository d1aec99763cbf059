use core::iter::FusedIterator;

use crate::*;

/// Cell indexes in expanding square rings around a center, clipped to the board.
///
/// The center comes first, then each ring clockwise starting right of the center. Every traversal is an independent
/// value, so nested or interleaved traversals never share state.
#[derive(Clone, Debug, PartialEq)]
pub struct Spiral {
    size: Coord2,
    center: (isize, isize),
    offset: (isize, isize),
    radius: isize,
    finished: bool,
}

impl Spiral {
    /// Rings up to Chebyshev distance `radius` from `center`.
    pub fn new(size: Coord2, center: Coord2, radius: Coord) -> Self {
        Self::with_radius(size, center, radius.into())
    }

    /// Rings until every board cell has been visited exactly once.
    pub fn whole_board(size: Coord2, center: Coord2) -> Self {
        let (x, y) = center;
        let (width, height) = size;
        let radius = x
            .max(width.saturating_sub(x + 1))
            .max(y)
            .max(height.saturating_sub(y + 1));
        Self::with_radius(size, center, radius.into())
    }

    fn with_radius(size: Coord2, center: Coord2, radius: isize) -> Self {
        assert!(
            center.0 < size.0 && center.1 < size.1,
            "spiral center {center:?} outside board {size:?}"
        );
        Self {
            size,
            center: (center.0.into(), center.1.into()),
            offset: (0, 0),
            radius,
            finished: false,
        }
    }

    /// Moves one step along the current ring, stepping out to the next ring after its last cell.
    fn advance(&mut self) {
        let (dx, dy) = &mut self.offset;
        let sum = *dx + *dy;
        let diff = *dx - *dy;
        if sum <= 0 && diff >= 0 {
            *dx += 1;
        } else if sum > 0 && diff <= 0 {
            *dx -= 1;
        } else if sum > 0 {
            *dy += 1;
        } else {
            *dy -= 1;
        }
    }

    fn current(&self) -> Option<CellIndex> {
        let x = self.center.0 + self.offset.0;
        let y = self.center.1 + self.offset.1;
        in_bounds(self.size, (x, y)).then(|| (x + isize::from(self.size.0) * y) as CellIndex)
    }
}

impl Iterator for Spiral {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            let (dx, dy) = self.offset;
            if dx.abs().max(dy.abs()) > self.radius {
                self.finished = true;
                break;
            }

            let item = self.current();
            self.advance();
            if item.is_some() {
                return item;
            }
        }
        None
    }
}

impl FusedIterator for Spiral {}
