use sheetspeak_core::{col_from_label, CellCoord, CellValue, Grid, Result};

use crate::ast::{BinaryOp, Expr, RefToken};
use crate::text::capitalize_words;

/// Round to two decimals, biased by one epsilon so `0.1 + 0.2` lands on `0.3`
pub fn round_number(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Evaluator for value expressions against a working grid.
///
/// Reading an address outside the grid grows the grid to include it, so the
/// evaluator needs mutable access.
pub struct Evaluator<'g> {
    grid: &'g mut Grid,
}

impl<'g> Evaluator<'g> {
    pub fn new(grid: &'g mut Grid) -> Self {
        Self { grid }
    }

    /// Evaluate an expression with `(row, col)` as the context cell
    pub fn evaluate(&mut self, expr: &Expr, row: usize, _col: usize) -> Result<CellValue> {
        match expr {
            Expr::Quoted(text) => Ok(CellValue::Text(text.clone())),
            Expr::Blank => Ok(CellValue::Empty),
            Expr::CellRef(token) => {
                let coord = self.resolve(token)?;
                Ok(self.grid.get_at(coord).clone())
            }
            Expr::Number(n) => Ok(CellValue::Number(*n)),

            Expr::ColumnFormula { left, op, right } => {
                let left = self.column_number(left, row);
                let right = self.column_number(right, row);
                Ok(arithmetic(left, *op, right))
            }

            Expr::CellFormula { left, op, right } => {
                let left = self.resolve(left)?;
                let right = self.resolve(right)?;
                let left = self.grid.get_at(left).to_number();
                let right = self.grid.get_at(right).to_number();
                Ok(arithmetic(left, *op, right))
            }

            Expr::CellNumberFormula { left, op, right } => {
                let left = self.resolve(left)?;
                let left = self.grid.get_at(left).to_number();
                Ok(arithmetic(left, *op, Some(*right)))
            }

            Expr::Label(text) => {
                tracing::trace!(expression = %text, "treating expression as a label");
                Ok(CellValue::Text(capitalize_words(text)))
            }
        }
    }

    /// Resolve an explicit address, growing the grid so it exists
    fn resolve(&mut self, token: &RefToken) -> Result<CellCoord> {
        let coord = CellCoord::from_parts(&token.letters, &token.digits)?;
        let width = self.grid.col_count().max(coord.col + 1);
        self.grid.ensure_row_capacity(coord.row + 1, width)?;
        Ok(coord)
    }

    /// Numeric value of a column at the context row; no growth
    fn column_number(&self, letters: &str, row: usize) -> Option<f64> {
        let col = col_from_label(letters).ok()?;
        self.grid.get(row, col).to_number()
    }
}

/// Non-numeric operands and overflowing results both give an empty cell
fn arithmetic(left: Option<f64>, op: BinaryOp, right: Option<f64>) -> CellValue {
    match (left, right) {
        (Some(a), Some(b)) => {
            let result = round_number(op.apply(a, b));
            if result.is_finite() {
                CellValue::Number(result)
            } else {
                CellValue::Empty
            }
        }
        _ => CellValue::Empty,
    }
}
