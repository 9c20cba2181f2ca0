//! Circular reference detection.
//!
//! A cell whose formula can reach itself through references can never be
//! computed. The sheet checks for this before handing a cell to the
//! evaluator, which does no cycle detection of its own.

use std::collections::HashSet;

use super::{CellRef, Grid};

/// Find a reference path from `start` back to itself.
/// Returns the path (starting and ending at `start`) if one exists.
pub fn find_cycle(start: &CellRef, grid: &Grid) -> Option<Vec<CellRef>> {
    let mut visited = HashSet::new();
    let mut path = vec![start.clone()];

    if reaches(start, start, grid, &mut visited, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn reaches(
    current: &CellRef,
    target: &CellRef,
    grid: &Grid,
    visited: &mut HashSet<CellRef>,
    path: &mut Vec<CellRef>,
) -> bool {
    let deps = match grid.get(current) {
        Some(entry) => entry.depends_on.clone(),
        None => return false,
    };

    for dep in deps {
        if &dep == target {
            path.push(dep);
            return true;
        }
        if !visited.insert(dep.clone()) {
            continue;
        }
        path.push(dep.clone());
        if reaches(&dep, target, grid, visited, path) {
            return true;
        }
        path.pop();
    }
    false
}
