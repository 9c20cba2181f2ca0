//! Cell resolution against the value store.
//!
//! The evaluator never touches cells directly. It asks a [`CellStore`] for a
//! [`CellSnapshot`] and turns that into either a number or a propagated error.

use std::collections::HashMap;

use super::cell_ref::CellRef;
use super::error::ErrorKind;

/// What the evaluator needs to know about a referenced cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSnapshot {
    pub has_formula: bool,
    pub error: Option<ErrorKind>,
    pub value: f64,
}

/// Read-only view of the cells a formula may reference.
pub trait CellStore {
    /// Returns None for a cell the store holds nothing for.
    fn lookup(&self, cell: &CellRef) -> Option<CellSnapshot>;
}

impl CellStore for HashMap<CellRef, CellSnapshot> {
    fn lookup(&self, cell: &CellRef) -> Option<CellSnapshot> {
        self.get(cell).cloned()
    }
}

/// Resolve a referenced cell to its value.
///
/// A stored error is propagated unchanged, except `EmptyFormula`, which is
/// reported as `InvalidCell` once the cell is found to have no formula.
pub fn resolve<S: CellStore + ?Sized>(store: &S, cell: &CellRef) -> Result<f64, ErrorKind> {
    let Some(snapshot) = store.lookup(cell) else {
        return Err(ErrorKind::InvalidCell);
    };

    if let Some(err) = snapshot.error
        && err != ErrorKind::EmptyFormula
    {
        return Err(err);
    }

    if !snapshot.has_formula {
        return Err(ErrorKind::InvalidCell);
    }

    Ok(snapshot.value)
}
