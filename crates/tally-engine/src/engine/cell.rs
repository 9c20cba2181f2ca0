//! Cell data structures for the sheet grid.
//!
//! - [`Cell`] - A cell's formula tokens plus its last computed value and error
//! - [`Grid`] - Thread-safe sparse storage for cells (backed by `DashMap`)

use dashmap::DashMap;

use super::cell_ref::CellRef;
use super::deps::extract_dependencies;
use super::error::ErrorKind;
use super::resolve::{CellSnapshot, CellStore};
use super::tokenize::tokenize;

/// A cell in the sheet.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Raw formula tokens as entered.
    pub formula: Vec<String>,
    pub depends_on: Vec<CellRef>,
    pub value: f64,
    pub error: Option<ErrorKind>,
}

impl Cell {
    pub fn new_empty() -> Cell {
        Cell {
            formula: vec![],
            depends_on: vec![],
            value: 0.0,
            error: None,
        }
    }

    /// Create a cell from already tokenized formula text.
    /// Dependencies are extracted from the tokens.
    pub fn new_formula(formula: Vec<String>) -> Cell {
        Cell {
            depends_on: extract_dependencies(&formula),
            formula,
            value: 0.0,
            error: None,
        }
    }

    /// Parse user input into a cell. A leading '=' is optional.
    pub fn from_input(input: &str) -> Cell {
        let trimmed = input.trim();
        let text = trimmed.strip_prefix('=').unwrap_or(trimmed);
        if text.trim().is_empty() {
            return Cell::new_empty();
        }
        Cell::new_formula(tokenize(text))
    }

    /// The formula as editable text.
    pub fn to_input_string(&self) -> String {
        self.formula.join(" ")
    }

    pub fn has_formula(&self) -> bool {
        !self.formula.is_empty()
    }

    pub fn snapshot(&self) -> CellSnapshot {
        CellSnapshot {
            has_formula: self.has_formula(),
            error: self.error,
            value: self.value,
        }
    }
}

/// Thread-safe sparse grid storage.
pub type Grid = DashMap<CellRef, Cell>;

impl CellStore for Grid {
    fn lookup(&self, cell: &CellRef) -> Option<CellSnapshot> {
        self.get(cell).map(|entry| entry.snapshot())
    }
}
