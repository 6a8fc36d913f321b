//! Turns short English instructions into grid edits.
//!
//! ```
//! use sheetspeak_agent::apply_instruction;
//! use sheetspeak_core::{CellValue, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["Item".into(), "Qty".into()],
//!     vec!["Tea".into(), 3.0.into()],
//! ]);
//! let result = apply_instruction(&grid, "multiply column b by 2").unwrap();
//! assert_eq!(result.grid.get(1, 1), &CellValue::Number(6.0));
//! assert_eq!(result.message, "Multiply column B by 2");
//! ```

pub mod instruction;
pub mod intent;
pub mod mutation;
pub mod session;

pub use instruction::Instruction;
pub use intent::{AdjustAction, Intent, IntentKind};
pub use mutation::Mutation;
pub use session::{Applied, Session};

use sheetspeak_core::{Grid, Result};

/// Interpret one instruction against a grid.
///
/// The caller's grid is never touched: every routine edits its own deep copy
/// and the new grid is only returned on success.
pub fn apply_instruction(grid: &Grid, raw: &str) -> Result<Mutation> {
    let instruction = Instruction::new(raw)?;
    let intent = Intent::parse(&instruction)?;

    let result = mutation::execute(&intent, grid.clone());
    if let Err(e) = &result {
        tracing::debug!(instruction = instruction.raw(), error = %e, "instruction failed");
    }
    result
}
