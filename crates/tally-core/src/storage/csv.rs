//! CSV import/export.
//!
//! Imported fields are formulas (a bare number is a one-token formula).
//! Export writes each cell's rendered value or error message.

use crate::document::Sheet;
use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tally_engine::engine::{Cell, CellRef, NumberFormat};

/// Parse a CSV file into cells, starting at the given offset.
/// Empty fields produce no cell.
pub fn parse_csv(path: &Path, start_col: usize, start_row: usize) -> Result<Vec<(CellRef, Cell)>> {
    let content = std::fs::read_to_string(path)?;
    let mut cells = Vec::new();

    for (row_idx, line) in content.lines().enumerate() {
        for (col_idx, field) in parse_csv_line(line).into_iter().enumerate() {
            let cell = Cell::from_input(&field);
            if !cell.has_formula() {
                continue;
            }
            cells.push((CellRef::new(start_col + col_idx, start_row + row_idx), cell));
        }
    }

    Ok(cells)
}

/// Split one CSV line into fields. Quoted fields may contain commas and
/// doubled quotes.
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (in_quotes, c) {
            (true, '"') if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            (true, '"') => in_quotes = false,
            (false, '"') => in_quotes = true,
            (false, ',') => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Export the sheet's rendered values to CSV, covering the bounding box of
/// all stored cells.
pub fn write_csv(path: &Path, sheet: &Sheet, fmt: &NumberFormat) -> Result<()> {
    let mut file = std::fs::File::create(path)?;

    let refs = sheet.cell_refs_sorted();
    if refs.is_empty() {
        return Ok(());
    }
    let min_row = refs.iter().map(|r| r.row).min().unwrap_or(0);
    let max_row = refs.iter().map(|r| r.row).max().unwrap_or(0);
    let min_col = refs.iter().map(|r| r.col).min().unwrap_or(0);
    let max_col = refs.iter().map(|r| r.col).max().unwrap_or(0);

    for row in min_row..=max_row {
        let fields: Vec<String> = (min_col..=max_col)
            .map(|col| escape_csv_field(&sheet.cell_display(&CellRef::new(col, row), fmt)))
            .collect();
        writeln!(file, "{}", fields.join(","))?;
    }

    Ok(())
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
