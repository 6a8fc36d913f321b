use serde::{Deserialize, Serialize};
use sheetspeak_agent::{IntentKind, Session};
use sheetspeak_core::{CellValue, Grid, SheetError};
use wasm_bindgen::prelude::*;

const HISTORY_LIMIT: usize = 100;

/// Instruction interpreter exposed to JavaScript
#[wasm_bindgen]
pub struct SheetAgent {
    session: Session,
}

/// Structured error object for JavaScript
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsSheetError {
    code: String,
    message: String,
}

impl From<SheetError> for JsSheetError {
    fn from(err: SheetError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl JsSheetError {
    fn invalid_input<E: std::fmt::Display>(err: E) -> JsValue {
        let error = Self {
            code: "INVALID_INPUT".to_string(),
            message: err.to_string(),
        };
        to_js(&error)
    }
}

fn to_js_error(err: SheetError) -> JsValue {
    to_js(&JsSheetError::from(err))
}

/// Serialize with `null` for empty cells rather than `undefined`
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

/// Result of a committed instruction
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult<'a> {
    pub grid: &'a Grid,
    pub message: String,
    pub intent: IntentKind,
}

#[wasm_bindgen]
impl SheetAgent {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: Session::new(HISTORY_LIMIT),
        }
    }

    /// Load rows of JSON scalars. Clears the history.
    #[wasm_bindgen(js_name = loadGrid)]
    pub fn load_grid(
        &mut self,
        rows: JsValue,
        sheet_name: &str,
        file_name: &str,
    ) -> Result<(), JsValue> {
        let rows: Vec<Vec<CellValue>> =
            serde_wasm_bindgen::from_value(rows).map_err(JsSheetError::invalid_input)?;
        self.session.load_upload(rows, sheet_name, file_name);
        Ok(())
    }

    /// Run one instruction; throws `{code, message}` on failure
    #[wasm_bindgen(js_name = runInstruction)]
    pub fn run_instruction(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let applied = self.session.run(text).map_err(to_js_error)?;
        let grid = self
            .session
            .grid()
            .ok_or_else(|| to_js_error(SheetError::NoDataset))?;

        Ok(to_js(&RunResult {
            grid,
            message: applied.message,
            intent: applied.intent,
        }))
    }

    /// Current grid, or `null` before anything was loaded
    #[wasm_bindgen(js_name = getGrid)]
    pub fn get_grid(&self) -> JsValue {
        match self.session.grid() {
            Some(grid) => to_js(grid),
            None => JsValue::NULL,
        }
    }

    #[wasm_bindgen(js_name = getSheetName)]
    pub fn get_sheet_name(&self) -> String {
        self.session.sheet_name().to_string()
    }

    /// Confirmation messages, newest first
    #[wasm_bindgen(js_name = getHistory)]
    pub fn get_history(&self) -> JsValue {
        to_js(&self.session.history().to_vec())
    }

    #[wasm_bindgen(js_name = exportName)]
    pub fn export_name(&self) -> String {
        self.session.export_name()
    }

    /// Current grid as JSON text
    #[wasm_bindgen(js_name = getGridJson)]
    pub fn get_grid_json(&self) -> Result<String, JsValue> {
        match self.session.grid() {
            Some(grid) => serde_json::to_string(grid).map_err(JsSheetError::invalid_input),
            None => Err(to_js_error(SheetError::NoDataset)),
        }
    }
}

impl Default for SheetAgent {
    fn default() -> Self {
        Self::new()
    }
}
