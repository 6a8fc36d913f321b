use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReferenceKind, Result, SheetError};

/// Cell coordinate (0-indexed internally)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub const fn new(row: usize, col: usize) -> Self {
        CellCoord { row, col }
    }

    /// Create from A1 notation (e.g., "A1" -> (0, 0), "b2" -> (1, 1))
    pub fn from_a1(notation: &str) -> Result<Self> {
        let notation = notation.trim();
        let split = notation
            .find(|c: char| c.is_ascii_digit())
            .filter(|&i| i > 0)
            .ok_or_else(|| SheetError::InvalidReference {
                kind: ReferenceKind::Cell,
                token: notation.to_string(),
            })?;

        let (letters, digits) = notation.split_at(split);
        Self::from_parts(letters, digits)
    }

    /// Build a coordinate from separately captured column letters and row digits
    pub fn from_parts(letters: &str, digits: &str) -> Result<Self> {
        let col = col_from_label(letters)?;
        let row = parse_row_number(digits)?;
        Ok(CellCoord { row, col })
    }

    /// Convert to A1 notation (e.g., (0, 0) -> "A1")
    pub fn to_a1(&self) -> String {
        format!("{}{}", col_to_label(self.col), self.row + 1)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: usize) -> String {
    let mut label = String::new();
    let mut n = col as u128 + 1;

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed).
///
/// Letters are case-insensitive. Anything else, an empty label, or a label
/// too long to index is rejected.
pub fn col_from_label(label: &str) -> Result<usize> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(SheetError::column(label));
    }

    let mut col: usize = 0;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(SheetError::column(label));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        col = col
            .checked_mul(26)
            .and_then(|n| n.checked_add(digit))
            .ok_or_else(|| SheetError::column(label))?;
    }

    Ok(col - 1)
}

/// Parse a 1-based row number into a 0-based row index
pub fn parse_row_number(digits: &str) -> Result<usize> {
    let trimmed = digits.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(SheetError::row(digits));
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(SheetError::row(digits)),
    }
}
