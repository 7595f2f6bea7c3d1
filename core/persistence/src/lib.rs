//! FILENAME: core/persistence/src/lib.rs
//! Sheetmerge Persistence Module
//!
//! Moves data between files and the engine:
//! - workbooks are decoded into a `Grid` (first worksheet, raw values only)
//! - a `Grid` is encoded back into a single-sheet XLSX file
//! - rule lists are read from JSON

mod error;
mod rules;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use rules::{load_rules, parse_rules};
pub use xlsx_reader::{grid_from_range, load_grid};
pub use xlsx_writer::save_grid;

/// Worksheet name used when writing a grid.
pub const OUTPUT_SHEET_NAME: &str = "Sheet1";
