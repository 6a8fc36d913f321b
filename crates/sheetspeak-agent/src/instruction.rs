use sheetspeak_core::{Result, SheetError};

/// A single instruction line, trimmed, with its lower-cased form for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    raw: String,
    normalized: String,
}

impl Instruction {
    /// Fails with `EmptyInstruction` when nothing but whitespace was typed
    pub fn new(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SheetError::EmptyInstruction);
        }

        Ok(Self {
            raw: raw.to_string(),
            normalized: raw.to_lowercase(),
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}
