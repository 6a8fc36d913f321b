//! One routine per intent.
//!
//! Each routine takes ownership of a working copy, edits it in place and
//! hands back a normalized grid with a confirmation message. On error the
//! working copy is simply dropped.

use sheetspeak_core::{col_to_label, CellCoord, CellValue, Grid, Result, SheetError};
use sheetspeak_formula::{capitalize_label, capitalize_words, evaluate, evaluate_numeric, parse, round_number, Evaluator};

use crate::intent::{AdjustAction, Intent, IntentKind};

/// A successful edit: the new grid and what changed
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub grid: Grid,
    pub message: String,
    pub intent: IntentKind,
}

impl Mutation {
    fn new(grid: Grid, intent: IntentKind, message: String) -> Self {
        Self {
            grid: grid.normalized(),
            message,
            intent,
        }
    }
}

/// Run a classified intent against a working copy of the grid
pub fn execute(intent: &Intent, grid: Grid) -> Result<Mutation> {
    match intent {
        Intent::SetCell { target, expression } => set_cell(grid, *target, expression),
        Intent::AdjustColumn {
            action,
            column,
            amount,
        } => adjust_column(grid, *action, *column, amount),
        Intent::AddColumn {
            target,
            left,
            right,
            subtract,
        } => add_column(grid, *target, *left, *right, *subtract),
        Intent::FillColumn { column, expression } => fill_column(grid, *column, expression),
        Intent::RenameColumn { column, title } => rename_column(grid, *column, title),
        Intent::ClearColumn { column } => clear_column(grid, *column),
    }
}

/// Display form of a number inside messages (`5`, `0.5`)
fn format_number(value: f64) -> String {
    CellValue::Number(value).as_text()
}

pub fn set_cell(mut grid: Grid, target: CellCoord, expression: &str) -> Result<Mutation> {
    let width = grid.col_count();
    grid.ensure_row_capacity(target.row + 1, width)?;

    let value = evaluate(expression, &mut grid, target.row, target.col)?;
    let message = format!("Set {} to {}", target, value);
    grid.set(target.row, target.col, value)?;

    Ok(Mutation::new(grid, IntentKind::SetCell, message))
}

/// Apply an amount to every numeric data cell of a column.
///
/// The amount is evaluated once, in the context of row 1. A zero divisor is
/// rejected up front; non-numeric cells and results that overflow are left
/// alone.
pub fn adjust_column(
    mut grid: Grid,
    action: AdjustAction,
    column: usize,
    amount: &str,
) -> Result<Mutation> {
    grid.ensure_column_capacity(column + 1)?;

    let factor = evaluate_numeric(amount, &mut grid, 1, column)?;
    if action == AdjustAction::Divide && factor == 0.0 {
        return Err(SheetError::DivisionByZero {
            column: col_to_label(column),
        });
    }

    for row in 1..grid.row_count() {
        if let Some(cell) = grid.cell_mut(row, column) {
            if let Some(current) = cell.to_number() {
                // an overflowing result leaves the cell as it was
                let next = round_number(action.apply(current, factor));
                if next.is_finite() {
                    *cell = CellValue::Number(next);
                }
            }
        }
    }

    let message = format!(
        "{} column {} by {}",
        capitalize_label(action.word()),
        col_to_label(column),
        format_number(factor)
    );
    Ok(Mutation::new(grid, IntentKind::AdjustColumn, message))
}

/// Write `left + right` (or `left - right`) into every data row of `target`
pub fn add_column(
    mut grid: Grid,
    target: usize,
    left: usize,
    right: usize,
    subtract: bool,
) -> Result<Mutation> {
    grid.ensure_column_capacity(target.max(left).max(right) + 1)?;

    let symbol = if subtract { '-' } else { '+' };
    let (left_label, right_label) = (col_to_label(left), col_to_label(right));
    grid.set(0, target, CellValue::Text(format!("{left_label}{symbol}{right_label}")))?;

    for row in 1..grid.row_count() {
        let value = match (grid.get(row, left).to_number(), grid.get(row, right).to_number()) {
            (Some(l), Some(r)) => {
                let result = round_number(if subtract { l - r } else { l + r });
                if result.is_finite() {
                    CellValue::Number(result)
                } else {
                    CellValue::Empty
                }
            }
            _ => CellValue::Empty,
        };
        grid.set(row, target, value)?;
    }

    let message = format!(
        "Computed column {} from {} {} {}",
        col_to_label(target),
        left_label,
        symbol,
        right_label
    );
    Ok(Mutation::new(grid, IntentKind::AddColumn, message))
}

/// Evaluate `expression` into each blank data cell of a column.
///
/// Rows added while evaluating (an expression reading past the last row)
/// are visited as well.
pub fn fill_column(mut grid: Grid, column: usize, expression: &str) -> Result<Mutation> {
    grid.ensure_column_capacity(column + 1)?;

    let expr = parse(expression);
    let mut row = 1;
    while row < grid.row_count() {
        if grid.get(row, column).is_blank() {
            let value = Evaluator::new(&mut grid).evaluate(&expr, row, column)?;
            grid.set(row, column, value)?;
        }
        row += 1;
    }

    let message = format!("Filled empty cells in column {}", col_to_label(column));
    Ok(Mutation::new(grid, IntentKind::FillColumn, message))
}

pub fn rename_column(mut grid: Grid, column: usize, title: &str) -> Result<Mutation> {
    grid.ensure_column_capacity(column + 1)?;

    let title = capitalize_words(title.trim());
    grid.set(0, column, CellValue::Text(title.clone()))?;

    let message = format!("Renamed column {} to {}", col_to_label(column), title);
    Ok(Mutation::new(grid, IntentKind::RenameColumn, message))
}

pub fn clear_column(mut grid: Grid, column: usize) -> Result<Mutation> {
    grid.ensure_column_capacity(column + 1)?;

    for row in 1..grid.row_count() {
        if let Some(cell) = grid.cell_mut(row, column) {
            *cell = CellValue::Empty;
        }
    }

    let message = format!("Cleared column {}", col_to_label(column));
    Ok(Mutation::new(grid, IntentKind::ClearColumn, message))
}
