//! Parser for the .tly file format.
//!
//! One cell per line as `LABEL: FORMULA`. The formula may carry a leading
//! `=`. Blank lines and lines starting with `#` are ignored.

use crate::error::{Result, TallyError};
use std::fs;
use std::path::Path;
use tally_engine::engine::{Cell, CellRef, Grid};

/// Parse a .tly file into a Grid
pub fn parse_tly(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)?;
    parse_tly_content(&content)
}

/// Parse .tly content from a string
pub fn parse_tly_content(content: &str) -> Result<Grid> {
    let grid = Grid::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((label, formula)) = line.split_once(':') else {
            return Err(TallyError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: FORMULA' format".to_string(),
            });
        };

        let label = label.trim();
        let cell_ref = CellRef::from_str(label).ok_or_else(|| TallyError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", label),
        })?;

        let cell = Cell::from_input(formula);
        if cell.has_formula() {
            grid.insert(cell_ref, cell);
        }
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formula_lines() {
        let grid = parse_tly_content("# header\n\nA1: 42\nB1: =A1 * 2\n").unwrap();
        assert_eq!(grid.len(), 2);
        let b1 = grid.get(&CellRef::new(1, 0)).unwrap();
        assert_eq!(b1.formula, vec!["A1", "*", "2"]);
        assert_eq!(b1.depends_on, vec![CellRef::new(0, 0)]);
    }

    #[test]
    fn test_parse_skips_blank_formula() {
        let grid = parse_tly_content("A1:   \n").unwrap();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_parse_missing_colon() {
        let err = parse_tly_content("A1: 1\nB1 2\n").unwrap_err();
        match err {
            TallyError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_invalid_label() {
        let err = parse_tly_content("1A: 3").unwrap_err();
        assert!(err.to_string().contains("Invalid cell reference: 1A"));
    }
}
