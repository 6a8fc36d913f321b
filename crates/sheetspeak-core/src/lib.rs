pub mod cell;
pub mod error;
pub mod grid;
pub mod range;

pub use cell::CellValue;
pub use error::{ReferenceKind, Result, SheetError};
pub use grid::{normalize, Grid, DEFAULT_HEADER};
pub use range::{col_from_label, col_to_label, parse_row_number, CellCoord};
