//! CSV import and export of session grids.

use sheetspeak_core::{CellValue, Grid};

use crate::error::AppError;

/// Parse headerless CSV text into rows.
///
/// Records may have different lengths. Fields load as text and empty
/// fields as empty cells; numbers are coerced later by the interpreter.
pub fn read_csv(text: &str) -> Result<Vec<Vec<CellValue>>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::text(field)
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Render a grid as CSV, one record per row
pub fn write_csv(grid: &Grid) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for row in grid.to_text_rows() {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}
