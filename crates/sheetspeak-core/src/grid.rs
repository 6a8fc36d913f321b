//! Rectangular cell container.
//!
//! Row 0 is the header row, rows 1.. hold data. Every row has the same
//! length once a public operation returns; growth only goes through
//! [`Grid::ensure_row_capacity`] and [`Grid::ensure_column_capacity`].

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::range::{col_to_label, CellCoord};

/// Title given to the single column of a grid built from no rows at all
pub const DEFAULT_HEADER: &str = "Column A";

/// Pad every row to the widest row's width.
///
/// An empty input becomes a one-cell header grid. Rows are copied, never
/// shared with the input.
pub fn normalize(rows: &[Vec<CellValue>]) -> Vec<Vec<CellValue>> {
    Grid::from_rows(rows.to_vec()).into_rows()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vec<CellValue>>", into = "Vec<Vec<CellValue>>")]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// Maximum number of rows a grid may grow to
    pub const MAX_ROWS: usize = 1_048_576;
    /// Maximum number of columns (column XFD)
    pub const MAX_COLS: usize = 16_384;

    /// Build a normalized grid from possibly ragged rows
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        if rows.is_empty() {
            return Self::default();
        }

        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(widest, CellValue::Empty);
                row
            })
            .collect();
        Grid { rows }
    }

    /// Re-establish the rectangular invariant after in-place edits
    pub fn normalized(self) -> Self {
        Self::from_rows(self.rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }

    /// Get the value at a position; anything outside the grid reads as empty
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    pub fn get_at(&self, coord: CellCoord) -> &CellValue {
        self.get(coord.row, coord.col)
    }

    /// Write a value, growing the grid to include the position first
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        let width = self.col_count().max(col + 1);
        self.ensure_row_capacity(row + 1, width)?;
        self.rows[row][col] = value;
        Ok(())
    }

    /// Mutable access to a cell already inside the grid
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut CellValue> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Append empty rows until there are at least `min_rows`, then widen to `min_cols`
    pub fn ensure_row_capacity(&mut self, min_rows: usize, min_cols: usize) -> Result<()> {
        if min_rows > Self::MAX_ROWS {
            return Err(SheetError::row(min_rows.to_string()));
        }
        // checked before any new row is allocated at `min_cols` width
        if min_cols > Self::MAX_COLS {
            return Err(SheetError::column(col_to_label(min_cols - 1)));
        }
        if self.rows.len() < min_rows {
            let width = min_cols.max(self.col_count());
            self.rows
                .resize_with(min_rows, || vec![CellValue::Empty; width]);
        }
        self.ensure_column_capacity(min_cols)
    }

    /// Widen every row to at least `min_cols` columns
    pub fn ensure_column_capacity(&mut self, min_cols: usize) -> Result<()> {
        if min_cols > Self::MAX_COLS {
            return Err(SheetError::column(col_to_label(min_cols - 1)));
        }
        for row in &mut self.rows {
            if row.len() < min_cols {
                row.resize(min_cols, CellValue::Empty);
            }
        }
        Ok(())
    }

    /// Render every cell as display text (for codecs)
    pub fn to_text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellValue::as_text).collect())
            .collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            rows: vec![vec![CellValue::text(DEFAULT_HEADER)]],
        }
    }
}

impl From<Vec<Vec<CellValue>>> for Grid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<CellValue>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ragged() -> Vec<Vec<CellValue>> {
        vec![
            vec!["Name".into(), "Hours".into()],
            vec!["Anita".into()],
            vec!["Rohan".into(), 40.0.into(), true.into()],
        ]
    }

    #[test]
    fn test_normalize_pads_rows() {
        let rows = normalize(&ragged());
        assert!(rows.iter().all(|r| r.len() == 3));
        assert_eq!(rows[1][1], CellValue::Empty);
        assert_eq!(rows[2][2], CellValue::Boolean(true));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&ragged());
        assert_eq!(normalize(&once), once);

        let empty = normalize(&[]);
        assert_eq!(normalize(&empty), empty);
    }

    #[test]
    fn test_empty_grid_gets_default_header() {
        let grid = Grid::from_rows(Vec::new());
        assert_eq!(grid.rows(), &[vec![CellValue::text("Column A")]]);
    }

    #[test]
    fn test_from_rows_matches_normalize() {
        assert_eq!(Grid::from_rows(ragged()).into_rows(), normalize(&ragged()));
    }

    #[test]
    fn test_ensure_row_capacity() {
        let mut grid = Grid::from_rows(ragged());
        grid.ensure_row_capacity(6, 4).unwrap();
        assert_eq!(grid.row_count(), 6);
        assert!(grid.rows().iter().all(|r| r.len() == 4));

        // never shrinks
        grid.ensure_row_capacity(2, 1).unwrap();
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.col_count(), 4);
    }

    #[test]
    fn test_set_grows_grid() {
        let mut grid = Grid::from_rows(vec![vec!["A".into()]]);
        grid.set(3, 2, 7.0.into()).unwrap();
        assert_eq!(grid.row_count(), 4);
        assert!(grid.rows().iter().all(|r| r.len() == 3));
        assert_eq!(grid.get(3, 2), &CellValue::Number(7.0));
        assert_eq!(grid.get(10, 10), &CellValue::Empty);
    }

    #[test]
    fn test_growth_is_bounded() {
        let mut grid = Grid::default();
        assert!(grid.ensure_row_capacity(Grid::MAX_ROWS + 1, 1).is_err());
        assert!(grid.ensure_column_capacity(Grid::MAX_COLS + 1).is_err());
        assert_eq!(grid, Grid::default());
    }

    #[test]
    fn test_wide_growth_on_new_rows_is_rejected_up_front() {
        let mut grid = Grid::from_rows(vec![vec!["Item".into(), "Qty".into()]]);
        let before = grid.clone();

        let err = grid.ensure_row_capacity(9, 200_000_000).unwrap_err();
        assert_eq!(err, SheetError::column(col_to_label(200_000_000 - 1)));
        assert_eq!(grid, before);
    }
}
