//! Host-side state around the interpreter: the live grid, where it came
//! from, and the log of confirmed edits.

use serde::Serialize;

use sheetspeak_core::{CellValue, Grid, Result, SheetError};
use sheetspeak_history::InstructionHistory;

use crate::apply_instruction;
use crate::intent::IntentKind;

/// Base name used for exports when nothing was uploaded under a name
pub const DEFAULT_FILE_NAME: &str = "excel-agent";

const UPLOAD_EXTENSIONS: &[&str] = &[".xlsx", ".xls", ".csv"];

/// Outcome of a committed instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Applied {
    pub message: String,
    pub intent: IntentKind,
}

#[derive(Debug)]
pub struct Session {
    grid: Option<Grid>,
    sheet_name: String,
    file_name: String,
    history: InstructionHistory,
}

impl Session {
    /// Create an empty session. `history_limit` of 0 keeps every entry.
    pub fn new(history_limit: usize) -> Self {
        Self {
            grid: None,
            sheet_name: String::new(),
            file_name: String::new(),
            history: InstructionHistory::new(history_limit),
        }
    }

    /// Replace the dataset and forget previous edits
    pub fn load(
        &mut self,
        rows: Vec<Vec<CellValue>>,
        sheet_name: impl Into<String>,
        file_name: impl Into<String>,
    ) {
        let grid = Grid::from_rows(rows);
        tracing::debug!(
            rows = grid.row_count(),
            cols = grid.col_count(),
            "dataset loaded"
        );
        self.grid = Some(grid);
        self.sheet_name = sheet_name.into();
        self.file_name = file_name.into();
        self.history.clear();
    }

    /// Like [`Session::load`] but takes an uploaded file name, dropping its extension
    pub fn load_upload(
        &mut self,
        rows: Vec<Vec<CellValue>>,
        sheet_name: impl Into<String>,
        upload_name: &str,
    ) {
        self.load(rows, sheet_name, strip_upload_extension(upload_name));
    }

    /// Interpret one instruction against the live grid.
    ///
    /// The grid and history change only when the instruction succeeds.
    pub fn run(&mut self, raw: &str) -> Result<Applied> {
        let grid = self.grid.as_ref().ok_or(SheetError::NoDataset)?;
        let mutation = apply_instruction(grid, raw)?;

        self.history.record(mutation.message.clone());
        self.grid = Some(mutation.grid);
        Ok(Applied {
            message: mutation.message,
            intent: mutation.intent,
        })
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn history(&self) -> &InstructionHistory {
        &self.history
    }

    /// File name (without extension) for a download of the edited grid
    pub fn export_name(&self) -> String {
        let base = if self.file_name.is_empty() {
            DEFAULT_FILE_NAME
        } else {
            self.file_name.as_str()
        };
        format!("{base}-updated")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(0)
    }
}

fn strip_upload_extension(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    UPLOAD_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(**ext))
        .map(|ext| &name[..name.len() - ext.len()])
        .unwrap_or(name)
}
