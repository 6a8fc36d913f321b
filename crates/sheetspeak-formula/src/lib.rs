pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod text;

pub use ast::{BinaryOp, Expr, RefToken};
pub use evaluator::{round_number, Evaluator};
pub use parser::parse;
pub use text::{capitalize_label, capitalize_words};

use sheetspeak_core::{CellValue, Grid, Result, SheetError};

/// Evaluate a value expression at `(row, col)` of a working grid.
///
/// Unrecognized text is not an error: it comes back as a title-cased label.
/// The only failures are addresses that cannot exist (row 0, beyond the
/// grid's maximum size).
pub fn evaluate(expression: &str, grid: &mut Grid, row: usize, col: usize) -> Result<CellValue> {
    let expr = parse(expression);
    Evaluator::new(grid).evaluate(&expr, row, col)
}

/// Evaluate an expression that must produce a number
pub fn evaluate_numeric(expression: &str, grid: &mut Grid, row: usize, col: usize) -> Result<f64> {
    let value = evaluate(expression, grid, row, col)?;
    to_number(&value).ok_or_else(|| SheetError::NotNumeric {
        expression: expression.trim().to_string(),
    })
}

/// Coerce a cell to a number; see [`CellValue::to_number`]
pub fn to_number(cell: &CellValue) -> Option<f64> {
    cell.to_number()
}
