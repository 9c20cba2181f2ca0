use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tally_engine::engine::{CellRef, Grid};

/// The value store: every cell's formula, computed value and error.
pub struct Sheet {
    pub grid: Grid,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the sheet has been modified since it was loaded or saved
    pub modified: bool,
    /// Reverse dependency map: cell -> cells that reference it
    pub dependents: HashMap<CellRef, HashSet<CellRef>>,
}

impl Sheet {
    /// Create an empty sheet. Does not touch the filesystem.
    pub fn new() -> Self {
        Sheet {
            grid: Grid::new(),
            file_path: None,
            modified: false,
            dependents: HashMap::new(),
        }
    }

    /// Create a sheet and load a file if provided. A path that does not exist
    /// yet is remembered as the save target.
    pub fn with_file(path: Option<PathBuf>) -> Result<Self> {
        let mut sheet = Self::new();
        if let Some(ref p) = path {
            if p.exists() {
                sheet.load_file(p)?;
            } else {
                sheet.file_path = Some(p.clone());
            }
        }
        Ok(sheet)
    }

    /// Rebuild the reverse dependency map from the grid.
    /// Call this after cells are added, removed, or their formulas change.
    pub(crate) fn rebuild_dependents(&mut self) {
        self.dependents.clear();
        for entry in self.grid.iter() {
            let cell_ref = entry.key();
            for dep in &entry.value().depends_on {
                self.dependents
                    .entry(dep.clone())
                    .or_default()
                    .insert(cell_ref.clone());
            }
        }
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
