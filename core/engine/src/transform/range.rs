//! FILENAME: core/engine/src/transform/range.rs
//! PURPOSE: Converts a rule's 1-based row bounds into a 0-based half-open span.
//! CONTEXT: The start row is converted (row 1 -> index 0) but the end row is
//! used as-is as the exclusive bound, so a 1-based inclusive end of 5 covers
//! indices up to 4. No clamping happens here; reads clamp instead.

use std::ops::Range;

use crate::grid::Grid;

/// Half-open span of 0-based row indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub start: u32,
    pub end: u32,
}

impl RowSpan {
    /// The rows of this span that actually exist in a grid of `row_count` rows.
    /// Spans past the end, or with end before start, yield nothing.
    pub fn clamped(&self, row_count: u32) -> Range<u32> {
        let end = self.end.min(row_count);
        let start = self.start.min(end);
        start..end
    }
}

/// Computes the span for `start_row` (1-based) up to `end_row` (1-based,
/// inclusive), defaulting the end to the height of `grid`.
pub fn select(grid: &Grid, start_row: u32, end_row: Option<u32>) -> RowSpan {
    RowSpan {
        start: start_row.saturating_sub(1),
        end: end_row.unwrap_or_else(|| grid.row_count()),
    }
}
