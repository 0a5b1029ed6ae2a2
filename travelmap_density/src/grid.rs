// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space bucketing grid.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use smallvec::SmallVec;

/// Inline capacity of a bucket before it spills to the heap.
const INLINE_BUCKET: usize = 4;

/// A cell of the screen-space grid, identified by column and row.
///
/// Cells are `cell_size` pixels wide and tall with cell `(0, 0)` starting at
/// the view origin. The `Display` form is `"col,row"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column index, `floor(x / cell_size)`.
    pub col: i64,
    /// Row index, `floor(y / cell_size)`.
    pub row: i64,
}

impl CellKey {
    /// Creates a key from column and row.
    #[must_use]
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }

    /// Returns the cell containing `pt`.
    ///
    /// Returns `None` if the point is not finite or `cell_size` is not a
    /// finite positive number.
    #[must_use]
    pub fn for_point(pt: Point, cell_size: f64) -> Option<Self> {
        if !pt.is_finite() || !(cell_size.is_finite() && cell_size > 0.0) {
            return None;
        }
        Some(Self {
            col: floor_to_i64(pt.x / cell_size),
            row: floor_to_i64(pt.y / cell_size),
        })
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "saturating cast; far off-screen cells only need to stay distinct from on-screen ones"
)]
fn floor_to_i64(v: f64) -> i64 {
    v.floor() as i64
}

/// Grouping of item indices by grid cell.
///
/// `GridBuckets` is rebuilt on every update pass. It keeps its allocations
/// between passes, so a single instance should be reused by the owner.
///
/// Cells are reported in the order they were first touched and members in
/// insertion order, so iteration is deterministic for a deterministic input
/// order.
#[derive(Debug, Default)]
pub struct GridBuckets {
    slots: HashMap<CellKey, usize>,
    cells: Vec<(CellKey, SmallVec<[usize; INLINE_BUCKET]>)>,
}

impl GridBuckets {
    /// Creates an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all cells, retaining capacity.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cells.clear();
    }

    /// Adds `item` to the bucket of `cell`.
    pub fn insert(&mut self, cell: CellKey, item: usize) {
        let cells = &mut self.cells;
        let slot = *self.slots.entry(cell).or_insert_with(|| {
            cells.push((cell, SmallVec::new()));
            cells.len() - 1
        });
        self.cells[slot].1.push(item);
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over occupied cells and their members.
    pub fn iter(&self) -> impl Iterator<Item = (CellKey, &[usize])> + '_ {
        self.cells
            .iter()
            .map(|(cell, members)| (*cell, members.as_slice()))
    }
}
