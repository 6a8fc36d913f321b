//! Built-in dataset and instruction examples offered to new users.

use sheetspeak_core::CellValue;

pub const SAMPLE_SHEET_NAME: &str = "Workforce";
pub const SAMPLE_FILE_NAME: &str = "sample-workforce";

pub const EXAMPLE_INSTRUCTIONS: &[&str] = &[
    "set cell e2 to c2 * d2",
    "increment column c by 5",
    "rename column e to payroll",
    "fill empty cells in column e with c * d",
    "add column f as sum of c and e",
    "clear column d",
];

const SAMPLE_HEADER: [&str; 5] = ["Employee", "Department", "Hours", "Rate", "Total"];

const SAMPLE_RECORDS: [(&str, &str, f64, f64); 4] = [
    ("Anita", "Finance", 32.0, 45.0),
    ("Rohan", "Marketing", 40.0, 38.0),
    ("Zoya", "Finance", 28.0, 52.0),
    ("Karan", "Sales", 45.0, 41.0),
];

/// Employee hours and rates with an empty `Total` column
pub fn sample_rows() -> Vec<Vec<CellValue>> {
    let header: Vec<CellValue> = SAMPLE_HEADER.iter().map(|title| CellValue::text(*title)).collect();
    let records = SAMPLE_RECORDS.iter().map(|(name, department, hours, rate)| {
        vec![
            CellValue::text(*name),
            CellValue::text(*department),
            CellValue::Number(*hours),
            CellValue::Number(*rate),
            CellValue::Empty,
        ]
    });
    std::iter::once(header).chain(records).collect()
}
