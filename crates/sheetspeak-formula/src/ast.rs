use std::fmt;

/// A cell address exactly as written (e.g. `c2`), resolved at evaluation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefToken {
    pub letters: String,
    pub digits: String,
}

impl RefToken {
    pub fn new(letters: impl Into<String>, digits: impl Into<String>) -> Self {
        Self {
            letters: letters.into(),
            digits: digits.into(),
        }
    }
}

impl fmt::Display for RefToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letters.to_ascii_uppercase(), self.digits)
    }
}

/// Shape of a value expression.
///
/// Variants are listed in recognition order; the first shape that matches
/// the whole trimmed input wins.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `"text"` or `'text'`, kept verbatim
    Quoted(String),

    /// `blank`, `empty`, `null`, `none`
    Blank,

    /// A single address such as `B7`
    CellRef(RefToken),

    /// `12`, `-3.5`, `2,75`
    Number(f64),

    /// `C * D`, columns read at the context row
    ColumnFormula {
        left: String,
        op: BinaryOp,
        right: String,
    },

    /// `C2 * D2`
    CellFormula {
        left: RefToken,
        op: BinaryOp,
        right: RefToken,
    },

    /// `C2 * 1.5`
    CellNumberFormula {
        left: RefToken,
        op: BinaryOp,
        right: f64,
    },

    /// Anything else, shown as a title-cased label
    Label(String),
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }

    /// Apply the operator. Division by zero yields 0 inside expressions.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => {
                if right == 0.0 {
                    0.0
                } else {
                    left / right
                }
            }
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(BinaryOp::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(BinaryOp::Sub.apply(2.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Mul.apply(2.0, 3.0), 6.0);
        assert_eq!(BinaryOp::Div.apply(3.0, 2.0), 1.5);
        assert_eq!(BinaryOp::Div.apply(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_ref_token_display() {
        assert_eq!(RefToken::new("ab", "12").to_string(), "AB12");
    }
}
