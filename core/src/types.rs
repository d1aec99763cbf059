use core::ops::{Index, IndexMut};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Row-major linear cell index, `x + width * y`.
pub type CellIndex = usize;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grids are stored as `(height, width)` so the row-major linear index lines up with the standard layout.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1.into(), self.0.into()]
    }
}

/// Whether signed coordinates, possibly produced by an offset, fall on a board of `size`.
pub fn in_bounds(size: Coord2, (x, y): (isize, isize)) -> bool {
    (0..isize::from(size.0)).contains(&x) && (0..isize::from(size.1)).contains(&y)
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One value per board cell, addressable by [`CellIndex`] or [`Coord2`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellMap<T> {
    cells: Array2<T>,
}

impl<T: Clone> CellMap<T> {
    pub fn from_elem((width, height): Coord2, value: T) -> Self {
        Self {
            cells: Array2::from_elem((height.into(), width.into()), value),
        }
    }
}

impl<T> CellMap<T> {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Values in linear index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.cells.iter()
    }

    /// Borrow the underlying grid, indexed as `[y, x]`.
    pub fn as_array(&self) -> &Array2<T> {
        &self.cells
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        let width = self.cells.ncols();
        assert!(
            index < self.cells.len(),
            "cell index {index} out of range for {} cells",
            self.cells.len()
        );
        [index / width, index % width]
    }
}

impl<T> Index<CellIndex> for CellMap<T> {
    type Output = T;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[self.nd_index(index)]
    }
}

impl<T> IndexMut<CellIndex> for CellMap<T> {
    fn index_mut(&mut self, index: CellIndex) -> &mut Self::Output {
        let nd_index = self.nd_index(index);
        &mut self.cells[nd_index]
    }
}

impl<T> Index<Coord2> for CellMap<T> {
    type Output = T;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
