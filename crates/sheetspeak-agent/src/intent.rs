//! Instruction classification.
//!
//! An instruction is tried against a fixed, ordered list of matchers. The
//! first pattern that matches decides the intent; later patterns are never
//! consulted, even if they would also match.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use sheetspeak_core::{col_from_label, CellCoord, Result, SheetError};

use crate::instruction::Instruction;

/// The six supported edit categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    SetCell,
    AdjustColumn,
    AddColumn,
    FillColumn,
    RenameColumn,
    ClearColumn,
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntentKind::SetCell => "set cell",
            IntentKind::AdjustColumn => "adjust column",
            IntentKind::AddColumn => "add column",
            IntentKind::FillColumn => "fill column",
            IntentKind::RenameColumn => "rename column",
            IntentKind::ClearColumn => "clear column",
        };
        f.write_str(name)
    }
}

/// Verb of an adjust-column instruction, kept as typed for the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustAction {
    Increase,
    Increment,
    Decrease,
    Reduce,
    Multiply,
    Divide,
}

impl AdjustAction {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "increase" => Some(AdjustAction::Increase),
            "increment" => Some(AdjustAction::Increment),
            "decrease" => Some(AdjustAction::Decrease),
            "reduce" => Some(AdjustAction::Reduce),
            "multiply" => Some(AdjustAction::Multiply),
            "divide" => Some(AdjustAction::Divide),
            _ => None,
        }
    }

    pub fn word(&self) -> &'static str {
        match self {
            AdjustAction::Increase => "increase",
            AdjustAction::Increment => "increment",
            AdjustAction::Decrease => "decrease",
            AdjustAction::Reduce => "reduce",
            AdjustAction::Multiply => "multiply",
            AdjustAction::Divide => "divide",
        }
    }

    /// Combine a cell value with the amount
    pub fn apply(&self, current: f64, amount: f64) -> f64 {
        match self {
            AdjustAction::Increase | AdjustAction::Increment => current + amount,
            AdjustAction::Decrease | AdjustAction::Reduce => current - amount,
            AdjustAction::Multiply => current * amount,
            AdjustAction::Divide => current / amount,
        }
    }
}

/// A classified instruction with its operands extracted
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    SetCell {
        target: CellCoord,
        expression: String,
    },
    AdjustColumn {
        action: AdjustAction,
        column: usize,
        amount: String,
    },
    AddColumn {
        target: usize,
        left: usize,
        right: usize,
        subtract: bool,
    },
    FillColumn {
        column: usize,
        expression: String,
    },
    RenameColumn {
        column: usize,
        title: String,
    },
    ClearColumn {
        column: usize,
    },
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::SetCell { .. } => IntentKind::SetCell,
            Intent::AdjustColumn { .. } => IntentKind::AdjustColumn,
            Intent::AddColumn { .. } => IntentKind::AddColumn,
            Intent::FillColumn { .. } => IntentKind::FillColumn,
            Intent::RenameColumn { .. } => IntentKind::RenameColumn,
            Intent::ClearColumn { .. } => IntentKind::ClearColumn,
        }
    }

    /// Classify an instruction.
    ///
    /// A pattern that matches but carries an impossible reference fails with
    /// `InvalidReference` rather than falling through to later patterns.
    pub fn parse(instruction: &Instruction) -> Result<Intent> {
        for matcher in matchers() {
            let text = match matcher.input {
                MatchInput::Raw => instruction.raw(),
                MatchInput::Normalized => instruction.normalized(),
            };
            if let Some(caps) = matcher.pattern.captures(text) {
                tracing::debug!(intent = %matcher.kind, instruction = instruction.raw(), "matched");
                return (matcher.extract)(&caps);
            }
        }

        Err(SheetError::Unrecognized {
            instruction: instruction.raw().to_string(),
        })
    }
}

/// Which form of the instruction a pattern runs against
#[derive(Debug, Clone, Copy)]
enum MatchInput {
    Raw,
    Normalized,
}

struct Matcher {
    kind: IntentKind,
    input: MatchInput,
    pattern: Regex,
    extract: fn(&Captures) -> Result<Intent>,
}

fn matchers() -> &'static [Matcher] {
    static MATCHERS: OnceLock<Vec<Matcher>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        let build = |kind: IntentKind,
                     input: MatchInput,
                     pattern: &str,
                     extract: fn(&Captures) -> Result<Intent>| Matcher {
            kind,
            input,
            pattern: Regex::new(pattern).expect("instruction pattern must compile"),
            extract,
        };

        vec![
            build(
                IntentKind::SetCell,
                MatchInput::Raw,
                r"(?i)(?:set|update)\s+cell\s+((?-u:[a-z]+))([0-9]+)\s+(?:to|as)\s+(.+)",
                extract_set_cell,
            ),
            build(
                IntentKind::AdjustColumn,
                MatchInput::Normalized,
                r"(increase|increment|decrease|reduce|multiply|divide)\s+column\s+((?-u:[a-z]+))\s+(?:by|with)\s+([\w ./*+-]+)",
                extract_adjust_column,
            ),
            build(
                IntentKind::AddColumn,
                MatchInput::Raw,
                r"(?i)add\s+column\s+((?-u:[a-z]+))\s+(?:as|with)\s+(?:sum|total|difference|value)\s+of\s+((?-u:[a-z]+))\s+(?:and|minus)\s+((?-u:[a-z]+))",
                extract_add_column,
            ),
            build(
                IntentKind::FillColumn,
                MatchInput::Raw,
                r"(?i)fill\s+(?:empty\s+)?cells?\s+(?:in\s+)?column\s+((?-u:[a-z]+))\s+(?:with|using)\s+(.+)",
                extract_fill_column,
            ),
            build(
                IntentKind::RenameColumn,
                MatchInput::Raw,
                r"(?i)rename\s+column\s+((?-u:[a-z]+))\s+(?:to|as)\s+(.+)",
                extract_rename_column,
            ),
            build(
                IntentKind::ClearColumn,
                MatchInput::Raw,
                r"(?i)clear\s+column\s+((?-u:[a-z]+))",
                extract_clear_column,
            ),
        ]
    })
}

fn extract_set_cell(caps: &Captures) -> Result<Intent> {
    Ok(Intent::SetCell {
        target: CellCoord::from_parts(&caps[1], &caps[2])?,
        expression: caps[3].to_string(),
    })
}

fn extract_adjust_column(caps: &Captures) -> Result<Intent> {
    let action = AdjustAction::from_word(&caps[1]).ok_or_else(|| SheetError::Unrecognized {
        instruction: caps[0].to_string(),
    })?;
    Ok(Intent::AdjustColumn {
        action,
        column: col_from_label(&caps[2])?,
        amount: caps[3].to_string(),
    })
}

fn extract_add_column(caps: &Captures) -> Result<Intent> {
    Ok(Intent::AddColumn {
        target: col_from_label(&caps[1])?,
        left: col_from_label(&caps[2])?,
        right: col_from_label(&caps[3])?,
        subtract: caps[0].to_lowercase().contains("minus"),
    })
}

fn extract_fill_column(caps: &Captures) -> Result<Intent> {
    Ok(Intent::FillColumn {
        column: col_from_label(&caps[1])?,
        expression: caps[2].to_string(),
    })
}

fn extract_rename_column(caps: &Captures) -> Result<Intent> {
    Ok(Intent::RenameColumn {
        column: col_from_label(&caps[1])?,
        title: caps[2].trim().to_string(),
    })
}

fn extract_clear_column(caps: &Captures) -> Result<Intent> {
    Ok(Intent::ClearColumn {
        column: col_from_label(&caps[1])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> Result<Intent> {
        Intent::parse(&Instruction::new(text)?)
    }

    #[test]
    fn test_set_cell() {
        assert_eq!(
            classify("set cell e2 to c2 * d2"),
            Ok(Intent::SetCell {
                target: CellCoord::new(1, 4),
                expression: "c2 * d2".into(),
            })
        );
        assert_eq!(
            classify("Please UPDATE cell AA10 as 'Done'").map(|i| i.kind()),
            Ok(IntentKind::SetCell)
        );
    }

    #[test]
    fn test_set_cell_keeps_expression_case() {
        match classify("set cell b4 to 'Mixed Case'") {
            Ok(Intent::SetCell { expression, .. }) => assert_eq!(expression, "'Mixed Case'"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_set_cell_row_zero() {
        assert_eq!(classify("set cell a0 to 5"), Err(SheetError::row("0")));
    }

    #[test]
    fn test_adjust_column() {
        assert_eq!(
            classify("Increment column C by 5"),
            Ok(Intent::AdjustColumn {
                action: AdjustAction::Increment,
                column: 2,
                amount: "5".into(),
            })
        );
        assert_eq!(
            classify("divide column d with 2").map(|i| i.kind()),
            Ok(IntentKind::AdjustColumn)
        );
    }

    #[test]
    fn test_add_column() {
        assert_eq!(
            classify("add column f as sum of c and e"),
            Ok(Intent::AddColumn {
                target: 5,
                left: 2,
                right: 4,
                subtract: false,
            })
        );
        assert_eq!(
            classify("add column g with value of c MINUS d"),
            Ok(Intent::AddColumn {
                target: 6,
                left: 2,
                right: 3,
                subtract: true,
            })
        );
        // only the word "minus" selects subtraction
        match classify("add column g as difference of c and d") {
            Ok(Intent::AddColumn { subtract, .. }) => assert!(!subtract),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fill_column() {
        assert_eq!(
            classify("fill empty cells in column e with c * d"),
            Ok(Intent::FillColumn {
                column: 4,
                expression: "c * d".into(),
            })
        );
        assert_eq!(
            classify("fill cell column b using 0").map(|i| i.kind()),
            Ok(IntentKind::FillColumn)
        );
    }

    #[test]
    fn test_rename_and_clear() {
        assert_eq!(
            classify("rename column e to payroll"),
            Ok(Intent::RenameColumn {
                column: 4,
                title: "payroll".into(),
            })
        );
        assert_eq!(classify("clear column d"), Ok(Intent::ClearColumn { column: 3 }));
    }

    #[test]
    fn test_order_decides_overlaps() {
        // contains both a set-cell and a clear-column phrase
        assert_eq!(
            classify("set cell a2 to clear column b").map(|i| i.kind()),
            Ok(IntentKind::SetCell)
        );
        assert_eq!(
            classify("rename column a to clear column b").map(|i| i.kind()),
            Ok(IntentKind::RenameColumn)
        );
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            classify("make it pretty"),
            Err(SheetError::Unrecognized {
                instruction: "make it pretty".into()
            })
        );
    }

    #[test]
    fn test_operands_are_ascii_only() {
        // Arabic-Indic digit three
        assert_eq!(
            classify("set cell a\u{663} to 5").map(|i| i.kind()),
            Err(SheetError::Unrecognized {
                instruction: "set cell a\u{663} to 5".into()
            })
        );
        // Kelvin sign folds to `k` under Unicode case folding
        assert!(matches!(
            classify("clear column \u{212A}"),
            Err(SheetError::Unrecognized { .. })
        ));
        assert!(matches!(
            classify("rename column \u{212A} to total"),
            Err(SheetError::Unrecognized { .. })
        ));
    }

    #[test]
    fn test_empty_before_matching() {
        assert_eq!(classify("   "), Err(SheetError::EmptyInstruction));
    }
}
