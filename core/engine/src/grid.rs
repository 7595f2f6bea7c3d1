//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: The in-memory table the rules read from and write into.
//! CONTEXT: This file defines the `Grid` struct which acts as the container
//! for all cell data. It uses a sparse storage strategy (HashMap) so that
//! decoded sheets with large blank areas stay cheap, while keeping the
//! declared height and width explicit: a sheet that ends in blank rows still
//! has those rows, and copy truncation depends on them.

use std::collections::HashMap;
use crate::cell::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// Row and Col are 0-based indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Sparse storage: keys are (row, col). Empty cells are never stored.
    cells: HashMap<(u32, u32), CellValue>,

    /// Number of rows in the grid (its height).
    row_count: u32,

    /// Number of columns in the grid (its widest row).
    col_count: u32,
}

impl Grid {
    /// Creates a new, empty Grid with no rows.
    pub fn new() -> Self {
        Grid {
            cells: HashMap::new(),
            row_count: 0,
            col_count: 0,
        }
    }

    /// Creates a blank Grid of the given height and width.
    pub fn with_dimensions(row_count: u32, col_count: u32) -> Self {
        Grid {
            cells: HashMap::new(),
            row_count,
            col_count,
        }
    }

    /// Builds a Grid from dense rows. Rows may have different lengths;
    /// the grid is as wide as its widest row.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let mut grid = Grid::with_dimensions(rows.len() as u32, 0);
        for (row_idx, row) in rows.into_iter().enumerate() {
            grid.col_count = grid.col_count.max(row.len() as u32);
            for (col_idx, value) in row.into_iter().enumerate() {
                if !value.is_empty() {
                    grid.cells.insert((row_idx as u32, col_idx as u32), value);
                }
            }
        }
        grid
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn col_count(&self) -> u32 {
        self.col_count
    }

    /// Number of stored (non-empty) cells.
    pub fn non_empty_count(&self) -> usize {
        self.cells.len()
    }

    /// Reads a cell. Anything not stored, including coordinates outside the
    /// grid or past the end of a short row, reads as `Empty`.
    pub fn value(&self, row: u32, col: u32) -> &CellValue {
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    /// Writes a cell. Writing `Empty` clears it.
    /// Dimensions only ever grow: a write past the last row or column
    /// extends the declared bounds to include it. The rule executors check
    /// the target height first, so they never grow a target.
    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        if row >= self.row_count {
            self.row_count = row + 1;
        }
        if col >= self.col_count {
            self.col_count = col + 1;
        }
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    /// Iterates stored cells in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &CellValue)> {
        self.cells.iter().map(|(&pos, value)| (pos, value))
    }

    /// Dense snapshot of the grid, `row_count` rows of `col_count` values.
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        (0..self.row_count)
            .map(|row| {
                (0..self.col_count)
                    .map(|col| self.value(row, col).clone())
                    .collect()
            })
            .collect()
    }
}
