//! Formula evaluation.
//!
//! A two-stack operator-precedence evaluator over classified tokens. Numbers
//! and resolved cell values go on the value stack; `(` and pending operators
//! go on the operator stack. `*` and `/` bind tighter than `+` and `-`, and
//! operators of equal precedence reduce left to right.
//!
//! Every call starts from fresh stacks and returns an [`Evaluation`], so one
//! [`Evaluator`] can be shared freely.

use tracing::{debug, trace};

use super::error::ErrorKind;
use super::resolve::{CellStore, resolve};
use super::token::{Operator, Token};

/// Outcome of evaluating one formula.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    pub result: f64,
    pub error: Option<ErrorKind>,
}

impl Evaluation {
    fn new(result: f64, error: Option<ErrorKind>) -> Evaluation {
        Evaluation { result, error }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The rendered error message, or an empty string when there is no error.
    pub fn error_message(&self) -> &'static str {
        self.error.map(|kind| kind.message()).unwrap_or("")
    }
}

/// Entries of the operator stack.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Pending {
    Open,
    Op(Operator),
}

#[derive(Default)]
struct Stacks {
    values: Vec<f64>,
    operators: Vec<Pending>,
}

impl Stacks {
    fn top_operator(&self) -> Option<Pending> {
        self.operators.last().copied()
    }

    fn has_open(&self) -> bool {
        self.operators.contains(&Pending::Open)
    }

    /// Pop one operator and two operands, push the result.
    ///
    /// Division by zero pushes `INFINITY` before failing; the stacks are not
    /// touched again for this evaluation.
    fn reduce(&mut self) -> Result<(), ErrorKind> {
        let op = match self.operators.pop() {
            Some(Pending::Op(op)) => op,
            _ => return Err(ErrorKind::InvalidOperator),
        };
        let (Some(b), Some(a)) = (self.values.pop(), self.values.pop()) else {
            return Err(ErrorKind::InvalidFormula);
        };

        let value = match op {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div => {
                if b == 0.0 {
                    self.values.push(f64::INFINITY);
                    return Err(ErrorKind::DivideByZero);
                }
                a / b
            }
        };
        trace!(%op, a, b, value, "reduce");
        self.values.push(value);
        Ok(())
    }

    /// The value left on top of the stack, or 0 when it is absent, zero or NaN.
    fn result(&self) -> f64 {
        match self.values.last() {
            Some(v) if *v != 0.0 && !v.is_nan() => *v,
            _ => 0.0,
        }
    }
}

/// Whether the operator on top of the stack should be reduced before
/// `incoming` is pushed. Never reduces across a parenthesis, and never
/// reduces `+`/`-` ahead of an incoming `*`/`/`.
fn has_precedence(incoming: Operator, top: Pending) -> bool {
    match top {
        Pending::Open => false,
        Pending::Op(top) => !(incoming.is_multiplicative() && !top.is_multiplicative()),
    }
}

/// Evaluates formulas against a cell store.
pub struct Evaluator<'a, S: CellStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: CellStore + ?Sized> Evaluator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Evaluator { store }
    }

    /// Evaluate one formula from scratch.
    pub fn evaluate(&self, formula: &[Token]) -> Evaluation {
        if formula.is_empty() {
            return Evaluation::new(0.0, Some(ErrorKind::EmptyFormula));
        }

        let mut tokens = formula;
        let mut pending = None;

        // A leading or trailing operator is invalid, with a few legacy shapes
        // that still produce a number.
        let first = &formula[0];
        let last = &formula[formula.len() - 1];
        if first.is_operator() || last.is_operator() {
            pending = Some(ErrorKind::InvalidFormula);
            match formula {
                [Token::Number(n), _] | [_, Token::Number(n)] => {
                    return Evaluation::new(*n, None);
                }
                [Token::Number(n), b, c] if !b.is_number() && !c.is_number() => {
                    return Evaluation::new(*n, pending);
                }
                [Token::Number(_), b, Token::Number(_), d] if !b.is_number() && !d.is_number() => {
                    tokens = &formula[..3];
                }
                _ => {}
            }
        }

        let mut stacks = Stacks::default();
        let error = match self.scan(tokens, &mut stacks) {
            Ok(()) => pending,
            Err(kind) => Some(kind),
        };

        let evaluation = Evaluation::new(stacks.result(), error);
        if let Some(kind) = evaluation.error {
            debug!(?kind, result = evaluation.result, "formula evaluation failed");
        }
        evaluation
    }

    fn scan(&self, tokens: &[Token], stacks: &mut Stacks) -> Result<(), ErrorKind> {
        for token in tokens {
            match token {
                Token::Number(n) => stacks.values.push(*n),
                Token::CellRef(cell) => {
                    let value = resolve(self.store, cell)?;
                    stacks.values.push(value);
                }
                Token::LParen => stacks.operators.push(Pending::Open),
                Token::RParen => {
                    if !stacks.has_open() {
                        return Err(ErrorKind::MissingParentheses);
                    }
                    if stacks.values.is_empty() {
                        return Err(ErrorKind::InvalidFormula);
                    }
                    while let Some(Pending::Op(_)) = stacks.top_operator() {
                        stacks.reduce()?;
                    }
                    stacks.operators.pop();
                }
                Token::Op(op) => {
                    while let Some(top) = stacks.top_operator()
                        && has_precedence(*op, top)
                    {
                        stacks.reduce()?;
                    }
                    stacks.operators.push(Pending::Op(*op));
                }
                Token::Invalid(_) => return Err(ErrorKind::InvalidOperator),
            }
        }

        if stacks.has_open() {
            return Err(ErrorKind::MissingParentheses);
        }
        while !stacks.operators.is_empty() {
            stacks.reduce()?;
        }
        if stacks.values.len() > 1 {
            return Err(ErrorKind::Partial);
        }
        Ok(())
    }
}

/// Classify `raw` tokens and evaluate them against `store`.
pub fn evaluate_raw<S, T>(store: &S, raw: &[T]) -> Evaluation
where
    S: CellStore + ?Sized,
    T: AsRef<str>,
{
    Evaluator::new(store).evaluate(&Token::classify_all(raw))
}
