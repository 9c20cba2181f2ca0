//! Writer for the .tly file format

use crate::error::Result;
use std::fs;
use std::path::Path;
use tally_engine::engine::Grid;

/// Write a Grid to a .tly file
pub fn write_tly(path: &Path, grid: &Grid) -> Result<()> {
    fs::write(path, write_tly_content(grid))?;
    Ok(())
}

/// Write a Grid to a .tly format string. Cells are written in row-major
/// order; cells without a formula are skipped.
pub fn write_tly_content(grid: &Grid) -> String {
    let mut lines = vec!["# Tally sheet".to_string()];

    let mut cells: Vec<_> = grid.iter().collect();
    cells.sort_by(|a, b| {
        let a_key = a.key();
        let b_key = b.key();
        a_key.row.cmp(&b_key.row).then(a_key.col.cmp(&b_key.col))
    });

    for entry in cells {
        let cell = entry.value();
        if !cell.has_formula() {
            continue;
        }
        lines.push(format!("{}: ={}", entry.key(), cell.to_input_string()));
    }

    lines.join("\n") + "\n"
}
