//! Formula tokens.
//!
//! Raw string tokens are classified once, at the tokenizer boundary, into a
//! [`Token`]. Everything downstream matches on the variant instead of
//! re-parsing text.

use std::fmt;

use super::cell_ref::CellRef;

/// One of the four binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// `*` and `/` bind tighter than `+` and `-`.
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Operator::Mul | Operator::Div)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A classified formula token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    CellRef(CellRef),
    Op(Operator),
    LParen,
    RParen,
    /// Anything else. Reaching one during evaluation is an invalid operator.
    Invalid(String),
}

impl Token {
    /// Classify a raw token. Numbers win over labels, labels over symbols.
    pub fn classify(raw: &str) -> Token {
        if let Some(n) = parse_number(raw) {
            return Token::Number(n);
        }
        if let Some(cell) = CellRef::from_str(raw) {
            return Token::CellRef(cell);
        }
        match raw {
            "(" => Token::LParen,
            ")" => Token::RParen,
            _ => match Operator::from_symbol(raw) {
                Some(op) => Token::Op(op),
                None => Token::Invalid(raw.to_string()),
            },
        }
    }

    /// Classify every raw token of a formula.
    pub fn classify_all<S: AsRef<str>>(raw: &[S]) -> Vec<Token> {
        raw.iter().map(|t| Token::classify(t.as_ref())).collect()
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Op(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::CellRef(cell) => write!(f, "{}", cell),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Invalid(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a numeric literal.
///
/// Surrounding whitespace is ignored. Accepts decimal and exponent notation
/// with an optional sign, unsigned `0x`/`0b`/`0o` integers, plus `Infinity`.
/// NaN never counts as a number.
pub fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if let Some(value) = parse_radix(trimmed) {
        return Some(value);
    }
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    if unsigned == "Infinity" {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let has_digit = unsigned.bytes().any(|b| b.is_ascii_digit());
    let literal_chars = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    let starts_like_number =
        matches!(unsigned.as_bytes().first(), Some(b) if b.is_ascii_digit() || *b == b'.');
    if !has_digit || !literal_chars || !starts_like_number {
        return None;
    }

    let value = unsigned.parse::<f64>().ok()?;
    Some(if negative { -value } else { value })
}

/// Unsigned integer with a base prefix, e.g. `0x1F`, `0b101`, `0O17`.
fn parse_radix(literal: &str) -> Option<f64> {
    let bytes = literal.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'b' | b'B' => 2,
        b'o' | b'O' => 8,
        _ => return None,
    };
    let digits = &literal[2..];
    if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|v| v as f64)
}
