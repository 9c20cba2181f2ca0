//! Evaluation error kinds.
//!
//! Several kinds render to the same `#ERR` message; they stay distinct here so
//! callers can tell them apart. The absence of an error is `None` on an
//! `Option<ErrorKind>`.

use thiserror::Error;

#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("#EMPTY!")]
    EmptyFormula,

    /// The formula reduced to more than one disconnected value.
    #[error("#ERR")]
    Partial,

    #[error("#DIV/0!")]
    DivideByZero,

    /// A referenced cell has no formula.
    #[error("#REF!")]
    InvalidCell,

    #[error("#ERR")]
    InvalidFormula,

    #[error("#ERR")]
    InvalidNumber,

    #[error("#ERR")]
    InvalidOperator,

    #[error("#ERR")]
    MissingParentheses,

    /// Raised by the sheet, never by the evaluator: the cell is part of a
    /// reference cycle.
    #[error("#CYCLE!")]
    Circular,
}

impl ErrorKind {
    /// The rendered message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::EmptyFormula => "#EMPTY!",
            ErrorKind::DivideByZero => "#DIV/0!",
            ErrorKind::InvalidCell => "#REF!",
            ErrorKind::Circular => "#CYCLE!",
            ErrorKind::Partial
            | ErrorKind::InvalidFormula
            | ErrorKind::InvalidNumber
            | ErrorKind::InvalidOperator
            | ErrorKind::MissingParentheses => "#ERR",
        }
    }
}
