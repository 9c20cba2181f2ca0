//! Dependency extraction from formula tokens.
//!
//! Every token that classifies as a cell reference is a dependency. Used by
//! the sheet to build the reverse dependency map and to order recomputation.

use super::cell_ref::CellRef;
use super::token::Token;

/// Extract the distinct cell references of a formula, in first-seen order.
pub fn extract_dependencies<S: AsRef<str>>(tokens: &[S]) -> Vec<CellRef> {
    let mut deps: Vec<CellRef> = Vec::new();
    for token in tokens {
        if let Token::CellRef(cell) = Token::classify(token.as_ref())
            && !deps.contains(&cell)
        {
            deps.push(cell);
        }
    }
    deps
}
