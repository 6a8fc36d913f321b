use std::fmt;
use thiserror::Error;

/// Which part of an A1 reference was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Column,
    Row,
    Cell,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Column => write!(f, "column"),
            ReferenceKind::Row => write!(f, "row"),
            ReferenceKind::Cell => write!(f, "cell"),
        }
    }
}

/// Errors raised while interpreting an instruction.
///
/// Every variant aborts the whole command; the caller's grid is left as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Invalid {kind} reference: {token}")]
    InvalidReference { kind: ReferenceKind, token: String },

    #[error("Expected a numeric value from \"{expression}\".")]
    NotNumeric { expression: String },

    #[error("Cannot divide by zero.")]
    DivisionByZero { column: String },

    #[error("Instruction not recognized. Try a simpler sentence.")]
    Unrecognized { instruction: String },

    #[error("Instruction cannot be empty.")]
    EmptyInstruction,

    #[error("Upload a sheet before running instructions.")]
    NoDataset,
}

impl SheetError {
    pub fn column(token: impl Into<String>) -> Self {
        SheetError::InvalidReference {
            kind: ReferenceKind::Column,
            token: token.into(),
        }
    }

    pub fn row(token: impl Into<String>) -> Self {
        SheetError::InvalidReference {
            kind: ReferenceKind::Row,
            token: token.into(),
        }
    }

    /// Stable machine-readable code for hosts
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::InvalidReference { .. } => "INVALID_REFERENCE",
            SheetError::NotNumeric { .. } => "NOT_NUMERIC",
            SheetError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            SheetError::Unrecognized { .. } => "UNRECOGNIZED",
            SheetError::EmptyInstruction => "EMPTY_INSTRUCTION",
            SheetError::NoDataset => "NO_DATASET",
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
