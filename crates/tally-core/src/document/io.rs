use super::Sheet;
use crate::error::{Result, TallyError};
use crate::storage::{parse_csv, parse_tly, write_csv, write_tly};
use std::path::{Path, PathBuf};
use tally_engine::engine::NumberFormat;
use tracing::debug;

impl Sheet {
    /// Save to the current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(TallyError::NoFilePath);
        };

        write_tly(path, &self.grid)?;
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file path.
    pub fn save_file_as(&mut self, path: &Path) -> Result<PathBuf> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()
    }

    /// Load a .tly file, replacing the current sheet, and compute every cell.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let grid = parse_tly(path)?;
        debug!(path = %path.display(), cells = grid.len(), "loaded sheet");

        self.grid = grid;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.rebuild_dependents();
        self.recalculate_all();
        Ok(())
    }

    /// Import a CSV file whose fields are formulas, placing its first field
    /// at (`start_col`, `start_row`). Returns the number of cells imported.
    pub fn import_csv(&mut self, path: &Path, start_col: usize, start_row: usize) -> Result<usize> {
        let cells = parse_csv(path, start_col, start_row)?;
        if cells.is_empty() {
            return Err(TallyError::EmptyCsv);
        }

        let count = cells.len();
        let refs: Vec<_> = cells.iter().map(|(r, _)| r.clone()).collect();
        for (cell_ref, cell) in cells {
            self.grid.insert(cell_ref, cell);
        }
        self.modified = true;
        self.rebuild_dependents();
        self.recalculate(&refs);
        Ok(count)
    }

    /// Export computed values (or error messages) as CSV.
    pub fn export_csv(&self, path: &Path, fmt: &NumberFormat) -> Result<()> {
        write_csv(path, self, fmt)
    }
}
