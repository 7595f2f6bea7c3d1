//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for sheetmerge integration tests.

#![allow(dead_code)]

use engine::{CellValue, Grid};
use sheetmerge_lib::RunConfig;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch directory holding a source workbook, a target workbook and a
/// rules file, plus the RunConfig pointing at them.
pub struct TestHarness {
    pub dir: TempDir,
    pub config: RunConfig,
}

impl TestHarness {
    pub fn new(source: &Grid, target: &Grid, rules_json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let source_path = dir.path().join("source.xlsx");
        let target_path = dir.path().join("target.xlsx");
        let rules_path = dir.path().join("rules.json");

        persistence::save_grid(source, &source_path).unwrap();
        persistence::save_grid(target, &target_path).unwrap();
        std::fs::write(&rules_path, rules_json).unwrap();

        let mut config = RunConfig::new(source_path, target_path, rules_path);
        config.output = dir.path().join("processed_excel.xlsx");

        TestHarness { dir, config }
    }

    /// Harness over the sample price list and order sheet.
    pub fn with_sample_data(rules_json: &str) -> Self {
        Self::new(&price_list(), &order_sheet(), rules_json)
    }

    pub fn output_path(&self) -> PathBuf {
        self.config.output.clone()
    }

    pub fn load_output(&self) -> Grid {
        persistence::load_grid(&self.config.output).unwrap()
    }
}

pub fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

/// SKU | Name | Price, with a header row.
pub fn price_list() -> Grid {
    Grid::from_rows(vec![
        vec![text("SKU"), text("Name"), text("Price")],
        vec![text("A-1"), text("Bolt"), CellValue::Number(0.25)],
        vec![text("A-2"), text("Nut"), CellValue::Number(0.1)],
        vec![text("A-3"), text("Washer"), CellValue::Number(0.05)],
        vec![text("A-1"), text("Bolt (new)"), CellValue::Number(0.3)],
    ])
}

/// Order | Qty | Unit price, with a header row.
pub fn order_sheet() -> Grid {
    Grid::from_rows(vec![
        vec![text("Order"), text("Qty"), text("Unit price")],
        vec![text("A-3"), CellValue::Number(10.0), CellValue::Empty],
        vec![text("A-9"), CellValue::Number(1.0), text("n/a")],
        vec![text("A-1"), CellValue::Number(4.0), CellValue::Empty],
    ])
}

pub fn assert_cell_text(grid: &Grid, row: u32, col: u32, expected: &str) {
    assert_eq!(grid.value(row, col), &text(expected), "cell ({}, {})", row, col);
}

pub fn assert_cell_number(grid: &Grid, row: u32, col: u32, expected: f64) {
    assert_eq!(
        grid.value(row, col),
        &CellValue::Number(expected),
        "cell ({}, {})",
        row,
        col
    );
}

pub fn assert_cell_empty(grid: &Grid, row: u32, col: u32) {
    assert_eq!(grid.value(row, col), &CellValue::Empty, "cell ({}, {})", row, col);
}
