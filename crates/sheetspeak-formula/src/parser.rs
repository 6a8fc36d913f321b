//! Nom-based recognizer for value expressions.
//!
//! Each shape is tried against the whole trimmed input in a fixed order.
//! Nothing here fails: input that matches no shape becomes [`Expr::Label`].

use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{alpha1, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_opt, opt, recognize, value},
    sequence::{delimited, pair, tuple},
    IResult,
};

use crate::ast::{BinaryOp, Expr, RefToken};

/// Skip surrounding whitespace
fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parse the recognized text of a number, accepting `,` as decimal separator
fn to_f64(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Digits with an optional `.`/`,` fraction, or a bare fraction (`.5`)
fn unsigned_number(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(alt((
            recognize(pair(digit1, opt(pair(one_of(".,"), digit0)))),
            recognize(pair(one_of(".,"), digit1)),
        ))),
        to_f64,
    )(input)
}

fn signed_number(input: &str) -> IResult<&str, f64> {
    map_opt(
        recognize(pair(opt(one_of("+-")), unsigned_number)),
        to_f64,
    )(input)
}

fn operator(input: &str) -> IResult<&str, BinaryOp> {
    map_opt(ws(one_of("+-*/")), BinaryOp::from_symbol)(input)
}

fn cell_ref(input: &str) -> IResult<&str, RefToken> {
    map(pair(alpha1, digit1), |(letters, digits)| {
        RefToken::new(letters, digits)
    })(input)
}

fn keyword(input: &str) -> IResult<&str, Expr> {
    value(
        Expr::Blank,
        alt((
            tag_no_case("blank"),
            tag_no_case("empty"),
            tag_no_case("null"),
            tag_no_case("none"),
        )),
    )(input)
}

fn column_formula(input: &str) -> IResult<&str, Expr> {
    map(tuple((alpha1, operator, alpha1)), |(left, op, right)| {
        Expr::ColumnFormula {
            left: left.to_string(),
            op,
            right: right.to_string(),
        }
    })(input)
}

fn cell_formula(input: &str) -> IResult<&str, Expr> {
    map(tuple((cell_ref, operator, cell_ref)), |(left, op, right)| {
        Expr::CellFormula { left, op, right }
    })(input)
}

fn cell_number_formula(input: &str) -> IResult<&str, Expr> {
    map(
        tuple((cell_ref, operator, unsigned_number)),
        |(left, op, right)| Expr::CellNumberFormula { left, op, right },
    )(input)
}

/// `"..."` or `'...'`; the inner text may itself contain quotes
fn quoted(input: &str) -> Option<Expr> {
    ['"', '\''].into_iter().find_map(|q| {
        let inner = input.strip_prefix(q)?.strip_suffix(q)?;
        Some(Expr::Quoted(inner.to_string()))
    })
}

/// Run a parser against the entire input
fn whole<'a, O>(
    input: &'a str,
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Option<O> {
    all_consuming(parser)(input).ok().map(|(_, out)| out)
}

/// Classify a value expression
pub fn parse(expression: &str) -> Expr {
    let input = expression.trim();

    quoted(input)
        .or_else(|| whole(input, keyword))
        .or_else(|| whole(input, cell_ref).map(Expr::CellRef))
        .or_else(|| whole(input, signed_number).map(Expr::Number))
        .or_else(|| whole(input, column_formula))
        .or_else(|| whole(input, cell_formula))
        .or_else(|| whole(input, cell_number_formula))
        .unwrap_or_else(|| Expr::Label(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted() {
        assert_eq!(parse("'hello world'"), Expr::Quoted("hello world".into()));
        assert_eq!(parse("  \"A1\"  "), Expr::Quoted("A1".into()));
        assert_eq!(parse("\"\""), Expr::Quoted(String::new()));
        // a lone quote is not a quoted literal
        assert_eq!(parse("\""), Expr::Label("\"".into()));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse("blank"), Expr::Blank);
        assert_eq!(parse("EMPTY"), Expr::Blank);
        assert_eq!(parse("Null"), Expr::Blank);
        assert_eq!(parse("none"), Expr::Blank);
        assert_eq!(parse("nothing"), Expr::Label("nothing".into()));
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(parse("c2"), Expr::CellRef(RefToken::new("c", "2")));
        assert_eq!(parse("AA10"), Expr::CellRef(RefToken::new("AA", "10")));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse("42"), Expr::Number(42.0));
        assert_eq!(parse("-3.5"), Expr::Number(-3.5));
        assert_eq!(parse("2,75"), Expr::Number(2.75));
        assert_eq!(parse(".5"), Expr::Number(0.5));
        assert_eq!(parse("5."), Expr::Number(5.0));
    }

    #[test]
    fn test_column_formula() {
        assert_eq!(
            parse("c * d"),
            Expr::ColumnFormula {
                left: "c".into(),
                op: BinaryOp::Mul,
                right: "d".into()
            }
        );
        assert_eq!(
            parse("C/D"),
            Expr::ColumnFormula {
                left: "C".into(),
                op: BinaryOp::Div,
                right: "D".into()
            }
        );
    }

    #[test]
    fn test_cell_formulas() {
        assert_eq!(
            parse("c2 * d2"),
            Expr::CellFormula {
                left: RefToken::new("c", "2"),
                op: BinaryOp::Mul,
                right: RefToken::new("d", "2"),
            }
        );
        assert_eq!(
            parse("c2/0"),
            Expr::CellNumberFormula {
                left: RefToken::new("c", "2"),
                op: BinaryOp::Div,
                right: 0.0,
            }
        );
        assert_eq!(
            parse("b3 + 1,5"),
            Expr::CellNumberFormula {
                left: RefToken::new("b", "3"),
                op: BinaryOp::Add,
                right: 1.5,
            }
        );
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(parse("  hello world "), Expr::Label("hello world".into()));
        assert_eq!(parse("c2 * d2 + 1"), Expr::Label("c2 * d2 + 1".into()));
        assert_eq!(parse("1e5x"), Expr::Label("1e5x".into()));
    }
}
