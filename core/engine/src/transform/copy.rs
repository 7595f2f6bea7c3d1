//! FILENAME: core/engine/src/transform/copy.rs
//! PURPOSE: Copy mode. Pastes a source column slice into a target column.
//! CONTEXT: The target grid is never grown. Once the paste reaches the last
//! target row the remaining values are dropped and counted, not reported as
//! an error.

use serde::Serialize;

use crate::grid::Grid;
use crate::transform::range::select;
use crate::transform::rule::Rule;

/// Result of one copy-mode rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CopyOutcome {
    /// Target cells written.
    pub cells_written: u32,
    /// Source values that did not fit in the target.
    pub truncated: u32,
}

/// Copies `rule`'s source column slice into `target`, starting at the rule's
/// target row. Only the rule's columns and rows are used; its mode is not
/// consulted.
pub fn copy(source: &Grid, target: &mut Grid, rule: &Rule) -> CopyOutcome {
    let rows = rule.source_rows();
    let span = select(source, rows.start, rows.end);
    let readable = span.clamped(source.row_count());

    let target_start = rule.target_row_start() - 1;
    let mut outcome = CopyOutcome::default();

    for (offset, source_row) in readable.clone().enumerate() {
        let target_row = target_start + offset as u32;
        if target_row >= target.row_count() {
            outcome.truncated = readable.end - source_row;
            break;
        }
        let value = source.value(source_row, rule.source_column()).clone();
        target.set_value(target_row, rule.target_column(), value);
        outcome.cells_written += 1;
    }

    outcome
}
