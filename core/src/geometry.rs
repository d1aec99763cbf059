use alloc::vec::Vec;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

pub type NeighborSet = SmallVec<[CellIndex; 8]>;
pub type WideNeighborSet = SmallVec<[CellIndex; 24]>;

/// Board shape plus the neighbor tables every other component reads from.
///
/// Both tables are filled once from radius 1 and radius 2 spirals (center dropped) and never change afterwards, so
/// neighbors are always listed in spiral order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    size: Coord2,
    neighbors: Vec<NeighborSet>,
    wide_neighbors: Vec<WideNeighborSet>,
}

impl BoardGeometry {
    pub fn new(size: Coord2) -> Self {
        assert!(size.0 > 0 && size.1 > 0, "empty board {size:?}");
        let total = usize::from(mult(size.0, size.1));
        let mut neighbors = Vec::with_capacity(total);
        let mut wide_neighbors = Vec::with_capacity(total);

        for y in 0..size.1 {
            for x in 0..size.0 {
                neighbors.push(Spiral::new(size, (x, y), 1).skip(1).collect());
                wide_neighbors.push(Spiral::new(size, (x, y), 2).skip(1).collect());
            }
        }

        Self {
            size,
            neighbors,
            wide_neighbors,
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn total_cells(&self) -> usize {
        self.neighbors.len()
    }

    pub fn coord_to_index(&self, coords: Coord2) -> CellIndex {
        assert!(
            self.in_bounds((coords.0.into(), coords.1.into())),
            "coordinates {coords:?} outside board {:?}",
            self.size
        );
        usize::from(coords.0) + usize::from(self.size.0) * usize::from(coords.1)
    }

    pub fn index_to_coord(&self, index: CellIndex) -> Coord2 {
        self.check_index(index);
        let width = usize::from(self.size.0);
        ((index % width) as Coord, (index / width) as Coord)
    }

    /// Whether signed coordinates, possibly produced by an offset, fall on the board.
    pub fn in_bounds(&self, coords: (isize, isize)) -> bool {
        in_bounds(self.size, coords)
    }

    /// The cell the solver opens with: `(width / 2, height / 2)`.
    pub fn center(&self) -> CellIndex {
        self.coord_to_index((self.size.0 / 2, self.size.1 / 2))
    }

    /// Cells at Chebyshev distance 1.
    pub fn neighbors(&self, index: CellIndex) -> &[CellIndex] {
        self.check_index(index);
        &self.neighbors[index]
    }

    /// Cells at Chebyshev distance 1 or 2.
    pub fn wide_neighbors(&self, index: CellIndex) -> &[CellIndex] {
        self.check_index(index);
        &self.wide_neighbors[index]
    }

    /// The cell itself followed by its neighbors; never holds a mine after placement.
    pub fn safe_region(&self, index: CellIndex) -> SmallVec<[CellIndex; 9]> {
        let mut region = SmallVec::new();
        region.push(index);
        region.extend_from_slice(self.neighbors(index));
        region
    }

    /// Neighbors of `a` that are also neighbors of `b`.
    pub fn shared_neighbors(
        &self,
        a: CellIndex,
        b: CellIndex,
    ) -> impl Iterator<Item = CellIndex> + '_ {
        let other = self.neighbors(b);
        self.neighbors(a)
            .iter()
            .copied()
            .filter(move |cell| other.contains(cell))
    }

    /// Neighbors of `a` that are not neighbors of `b`.
    pub fn exclusive_neighbors(
        &self,
        a: CellIndex,
        b: CellIndex,
    ) -> impl Iterator<Item = CellIndex> + '_ {
        let other = self.neighbors(b);
        self.neighbors(a)
            .iter()
            .copied()
            .filter(move |cell| !other.contains(cell))
    }

    /// Full-board spiral anchored at `center`.
    pub fn spiral(&self, center: CellIndex) -> Spiral {
        Spiral::whole_board(self.size, self.index_to_coord(center))
    }

    /// Reorders `cells` by their position in the full-board spiral around `center`.
    pub fn ordered_in_spiral(
        &self,
        center: CellIndex,
        cells: impl IntoIterator<Item = CellIndex>,
    ) -> Vec<CellIndex> {
        let mut remaining: HashSet<CellIndex> = cells.into_iter().collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        for index in self.spiral(center) {
            if remaining.is_empty() {
                break;
            }
            if remaining.remove(&index) {
                ordered.push(index);
            }
        }
        assert!(remaining.is_empty(), "cells outside the board: {remaining:?}");
        ordered
    }

    fn check_index(&self, index: CellIndex) {
        assert!(
            index < self.total_cells(),
            "cell index {index} out of range for {} cells",
            self.total_cells()
        );
    }
}
