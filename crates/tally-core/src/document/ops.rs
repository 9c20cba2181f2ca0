use super::Sheet;
use std::collections::HashSet;
use tally_engine::engine::{
    Cell, CellRef, ErrorKind, Evaluation, Evaluator, NumberFormat, Token, find_cycle,
    format_evaluation, tokenize,
};
use tracing::{debug, warn};

impl Sheet {
    /// Set a cell from user input and recompute it and everything that
    /// depends on it.
    pub fn set_cell(&mut self, cell_ref: &CellRef, input: &str) {
        let mut cell = Cell::from_input(input);
        // An empty formula keeps showing whatever the cell held before.
        if let Some(previous) = self.grid.get(cell_ref).map(|c| c.value) {
            cell.value = previous;
        }
        self.grid.insert(cell_ref.clone(), cell);
        self.modified = true;
        self.rebuild_dependents();
        self.recalculate(std::slice::from_ref(cell_ref));
    }

    /// Remove a cell. Cells referencing it are recomputed and will report
    /// `#REF!`.
    pub fn clear_cell(&mut self, cell_ref: &CellRef) {
        if self.grid.remove(cell_ref).is_none() {
            return;
        }
        self.modified = true;
        self.rebuild_dependents();
        self.recalculate(std::slice::from_ref(cell_ref));
    }

    /// Recompute every cell in the sheet.
    pub fn recalculate_all(&mut self) {
        let all: Vec<CellRef> = self.grid.iter().map(|e| e.key().clone()).collect();
        self.recalculate(&all);
    }

    /// Recompute `changed` and all of their transitive dependents, each cell
    /// after the cells it references.
    pub fn recalculate(&mut self, changed: &[CellRef]) {
        let order = self.evaluation_order(changed);
        debug!(cells = order.len(), "recalculating");
        for cell_ref in &order {
            self.recompute_cell(cell_ref);
        }
    }

    /// Value and error currently stored for a cell.
    pub fn cell_state(&self, cell_ref: &CellRef) -> Option<Evaluation> {
        self.grid.get(cell_ref).map(|cell| Evaluation {
            result: cell.value,
            error: cell.error,
        })
    }

    /// Display string for a cell. Empty for cells the sheet does not hold.
    pub fn cell_display(&self, cell_ref: &CellRef, fmt: &NumberFormat) -> String {
        match self.cell_state(cell_ref) {
            Some(state) => format_evaluation(&state, fmt),
            None => String::new(),
        }
    }

    /// Evaluate formula text against the current sheet without storing it.
    pub fn evaluate_formula(&self, text: &str) -> Evaluation {
        let tokens = Token::classify_all(&tokenize(text));
        Evaluator::new(&self.grid).evaluate(&tokens)
    }

    /// All stored cells in row-major order.
    pub fn cell_refs_sorted(&self) -> Vec<CellRef> {
        let mut refs: Vec<CellRef> = self.grid.iter().map(|e| e.key().clone()).collect();
        refs.sort_by(|a, b| a.row.cmp(&b.row).then(a.col.cmp(&b.col)));
        refs
    }

    fn recompute_cell(&self, cell_ref: &CellRef) {
        let outcome = if let Some(path) = find_cycle(cell_ref, &self.grid) {
            let path: Vec<String> = path.iter().map(|c| c.to_string()).collect();
            warn!(cell = %cell_ref, cycle = %path.join(" -> "), "circular reference");
            Evaluation {
                result: 0.0,
                error: Some(ErrorKind::Circular),
            }
        } else {
            let Some(formula) = self.grid.get(cell_ref).map(|c| c.formula.clone()) else {
                return;
            };
            Evaluator::new(&self.grid).evaluate(&Token::classify_all(&formula))
        };

        if let Some(mut cell) = self.grid.get_mut(cell_ref) {
            if outcome.error != Some(ErrorKind::EmptyFormula) {
                cell.value = outcome.result;
            }
            cell.error = outcome.error;
        }
    }

    /// Cells reachable from `roots` through the dependents map, ordered so
    /// every cell comes after the cells it references.
    fn evaluation_order(&self, roots: &[CellRef]) -> Vec<CellRef> {
        let mut affected: HashSet<CellRef> = HashSet::new();
        let mut to_process: Vec<CellRef> = roots.to_vec();
        while let Some(cell_ref) = to_process.pop() {
            if !affected.insert(cell_ref.clone()) {
                continue;
            }
            if let Some(deps) = self.dependents.get(&cell_ref) {
                to_process.extend(deps.iter().cloned());
            }
        }

        // Sorted for a deterministic order among independent cells.
        let mut starts: Vec<CellRef> = affected.iter().cloned().collect();
        starts.sort();

        let mut visited = HashSet::new();
        let mut order = Vec::with_capacity(affected.len());
        for start in &starts {
            self.visit(start, &affected, &mut visited, &mut order);
        }
        order
    }

    fn visit(
        &self,
        cell_ref: &CellRef,
        affected: &HashSet<CellRef>,
        visited: &mut HashSet<CellRef>,
        order: &mut Vec<CellRef>,
    ) {
        if !visited.insert(cell_ref.clone()) {
            return;
        }
        let deps = match self.grid.get(cell_ref) {
            Some(cell) => cell.depends_on.clone(),
            None => Vec::new(),
        };
        for dep in deps.iter().filter(|d| affected.contains(*d)) {
            self.visit(dep, affected, visited, order);
        }
        order.push(cell_ref.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(label: &str) -> CellRef {
        CellRef::from_str(label).unwrap()
    }

    #[test]
    fn test_set_cell_computes_value() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "=(3 + 4) * 2");
        assert_eq!(
            sheet.cell_state(&cell("A1")),
            Some(Evaluation { result: 14.0, error: None })
        );
        assert!(sheet.modified);
    }

    #[test]
    fn test_dependents_recompute_in_order() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("C1"), "B1 + A1");
        sheet.set_cell(&cell("B1"), "A1 * 2");
        sheet.set_cell(&cell("A1"), "5");
        assert_eq!(sheet.cell_state(&cell("B1")).unwrap().result, 10.0);
        assert_eq!(sheet.cell_state(&cell("C1")).unwrap().result, 15.0);

        sheet.set_cell(&cell("A1"), "1");
        assert_eq!(sheet.cell_state(&cell("C1")).unwrap().result, 3.0);
    }

    #[test]
    fn test_reference_before_target_exists_is_ref_error() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A2"), "A1 + 1");
        let fmt = NumberFormat::default();
        assert_eq!(sheet.cell_display(&cell("A2"), &fmt), "#REF!");

        sheet.set_cell(&cell("A1"), "41");
        assert_eq!(sheet.cell_display(&cell("A2"), &fmt), "42");
    }

    #[test]
    fn test_empty_formula_keeps_previous_value() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "9");
        sheet.set_cell(&cell("A1"), "");
        let state = sheet.cell_state(&cell("A1")).unwrap();
        assert_eq!(state.error, Some(ErrorKind::EmptyFormula));
        assert_eq!(state.result, 9.0);
    }

    #[test]
    fn test_reference_to_emptied_cell_is_invalid_cell() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "9");
        sheet.set_cell(&cell("B1"), "A1");
        sheet.set_cell(&cell("A1"), "");
        assert_eq!(
            sheet.cell_state(&cell("B1")).unwrap().error,
            Some(ErrorKind::InvalidCell)
        );
    }

    #[test]
    fn test_error_propagates_through_references() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "1 / 0");
        sheet.set_cell(&cell("B1"), "A1 + 1");
        let fmt = NumberFormat::default();
        assert_eq!(sheet.cell_display(&cell("A1"), &fmt), "#DIV/0!");
        assert_eq!(sheet.cell_display(&cell("B1"), &fmt), "#DIV/0!");
    }

    #[test]
    fn test_cycle_marks_cells_circular() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "B1 + 1");
        sheet.set_cell(&cell("B1"), "A1 + 1");
        sheet.set_cell(&cell("C1"), "A1");
        let fmt = NumberFormat::default();
        assert_eq!(sheet.cell_display(&cell("A1"), &fmt), "#CYCLE!");
        assert_eq!(sheet.cell_display(&cell("B1"), &fmt), "#CYCLE!");
        assert_eq!(sheet.cell_display(&cell("C1"), &fmt), "#CYCLE!");

        sheet.set_cell(&cell("B1"), "2");
        assert_eq!(sheet.cell_display(&cell("A1"), &fmt), "3");
        assert_eq!(sheet.cell_display(&cell("C1"), &fmt), "3");
    }

    #[test]
    fn test_clear_cell_invalidates_dependents() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "2");
        sheet.set_cell(&cell("B1"), "A1 * A1");
        sheet.clear_cell(&cell("A1"));
        assert!(sheet.cell_state(&cell("A1")).is_none());
        assert_eq!(
            sheet.cell_state(&cell("B1")).unwrap().error,
            Some(ErrorKind::InvalidCell)
        );
    }

    #[test]
    fn test_evaluate_formula_does_not_store() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("A1"), "6");
        let e = sheet.evaluate_formula("A1 / 4");
        assert_eq!(e, Evaluation { result: 1.5, error: None });
        assert_eq!(sheet.grid.len(), 1);
    }

    #[test]
    fn test_cell_refs_sorted_row_major() {
        let mut sheet = Sheet::new();
        sheet.set_cell(&cell("B2"), "1");
        sheet.set_cell(&cell("A2"), "1");
        sheet.set_cell(&cell("C1"), "1");
        let labels: Vec<String> = sheet.cell_refs_sorted().iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["C1", "A2", "B2"]);
    }
}
