//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the grid transformation engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//! The engine is synchronous and owns no global state: every call takes its
//! grids and rules as parameters and mutates only the target it is handed.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod transform;

// Re-export commonly used types at the crate root
pub use cell::CellValue;
pub use coord::{index_to_col, resolve_column, ColumnLabel, ColumnRefError};
pub use grid::Grid;
pub use transform::{
    apply_rule, run, run_validated, BoundsNotice, ErrorKind, LookupTable, RowInput, Rule,
    RuleDefect, RuleError, RuleField, RuleMode, RuleOutcome, RuleSpec, RunSummary, SourceRows,
};
