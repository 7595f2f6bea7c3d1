//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, OUTPUT_SHEET_NAME};
use engine::{index_to_col, CellValue, Grid};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

/// Writes a grid as a single worksheet. Raw values only, no styles.
pub fn save_grid(grid: &Grid, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET_NAME)?;

    // Sorted so the written file does not depend on hash order
    let mut cells: Vec<_> = grid.iter().collect();
    cells.sort_by_key(|(pos, _)| *pos);

    for ((row, col), value) in cells {
        let col = u16::try_from(col).map_err(|_| {
            PersistenceError::InvalidFormat(format!(
                "column {} is beyond the XLSX column limit",
                index_to_col(col)
            ))
        })?;

        match value {
            CellValue::Empty => {}
            CellValue::Number(n) => {
                worksheet.write_number(row, col, *n)?;
            }
            CellValue::Text(s) => {
                worksheet.write_string(row, col, s)?;
            }
            CellValue::Boolean(b) => {
                worksheet.write_boolean(row, col, *b)?;
            }
        }
    }

    xlsx.save(path)?;

    log::debug!(
        target: "IO",
        "saved {} values to {}",
        grid.non_empty_count(),
        path.display()
    );
    Ok(())
}
