//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::PersistenceError;
use calamine::{open_workbook_auto, Data, Range, Reader};
use engine::{CellValue, Grid};
use std::path::Path;

/// Loads the first worksheet of a workbook (xlsx, xlsm, xls, ods) as a Grid.
/// Cells keep their absolute sheet positions, so column "A" is always index 0
/// even when the used range starts further right.
pub fn load_grid(path: &Path) -> Result<Grid, PersistenceError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let first_sheet = sheet_names.first().ok_or_else(|| {
        PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    let range = workbook.worksheet_range(first_sheet)?;
    let grid = grid_from_range(&range);

    log::debug!(
        target: "IO",
        "loaded '{}' from {}: {} rows, {} columns, {} values",
        first_sheet,
        path.display(),
        grid.row_count(),
        grid.col_count(),
        grid.non_empty_count()
    );

    Ok(grid)
}

/// Converts a decoded sheet range into a Grid. The grid extends from the
/// sheet origin to the bottom-right corner of the used range.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let (row_count, col_count) = match range.end() {
        Some((row, col)) => (row + 1, col + 1),
        None => (0, 0),
    };
    let mut grid = Grid::with_dimensions(row_count, col_count);

    let Some((start_row, start_col)) = range.start() else {
        return grid;
    };

    for (row_idx, col_idx, cell) in range.cells() {
        let value = match cell {
            Data::Empty => continue,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::Error(e) => CellValue::Text(e.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) => CellValue::Text(s.clone()),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
        };
        grid.set_value(start_row + row_idx as u32, start_col + col_idx as u32, value);
    }

    grid
}
