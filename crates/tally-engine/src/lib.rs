//! tally_engine - Formula evaluation engine.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn grid_of(cells: &[(&str, &str, f64)]) -> Grid {
        let grid = Grid::new();
        for (label, text, value) in cells {
            let mut cell = Cell::from_input(text);
            cell.value = *value;
            grid.insert(CellRef::from_str(label).unwrap(), cell);
        }
        grid
    }

    fn eval(raw: &[&str]) -> Evaluation {
        evaluate_raw(&Grid::new(), raw)
    }

    #[test]
    fn test_empty_formula() {
        let e = eval(&[]);
        assert_eq!(e.error, Some(ErrorKind::EmptyFormula));
        assert_eq!(e.error_message(), "#EMPTY!");
    }

    #[test]
    fn test_simple_addition() {
        let e = eval(&["3", "+", "4"]);
        assert_eq!(e.result, 7.0);
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval(&["3", "+", "4", "*", "2"]).result, 11.0);
        assert_eq!(eval(&["3", "*", "4", "+", "2"]).result, 14.0);
        assert_eq!(eval(&["8", "-", "6", "/", "2"]).result, 5.0);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let e = eval(&["(", "3", "+", "4", ")", "*", "2"]);
        assert_eq!(e, Evaluation { result: 14.0, error: None });
    }

    #[test]
    fn test_divide_by_zero() {
        let e = eval(&["5", "/", "0"]);
        assert_eq!(e.error, Some(ErrorKind::DivideByZero));
        assert_eq!(e.error_message(), "#DIV/0!");
    }

    #[test]
    fn test_unmatched_open_paren() {
        let e = eval(&["(", "3", "+", "4"]);
        assert_eq!(e.error, Some(ErrorKind::MissingParentheses));
        assert_eq!(e.error_message(), "#ERR");
    }

    #[test]
    fn test_reference_to_cell_without_formula() {
        let grid = grid_of(&[("A1", "", 0.0)]);
        let e = evaluate_raw(&grid, &["A1"]);
        assert_eq!(e.error, Some(ErrorKind::InvalidCell));
        assert_eq!(e.error_message(), "#REF!");
    }

    #[test]
    fn test_reference_to_missing_cell() {
        let e = eval(&["B7", "+", "1"]);
        assert_eq!(e.error, Some(ErrorKind::InvalidCell));
    }

    #[test]
    fn test_adjacent_values_are_partial() {
        let e = eval(&["3", "4"]);
        assert_eq!(e.error, Some(ErrorKind::Partial));
    }

    #[test]
    fn test_two_token_leniency() {
        assert_eq!(eval(&["+", "5"]), Evaluation { result: 5.0, error: None });
        assert_eq!(eval(&["5", "+"]), Evaluation { result: 5.0, error: None });
    }

    #[test]
    fn test_cell_references() {
        let grid = grid_of(&[("A1", "10", 10.0), ("B2", "A1 / 4", 2.5)]);
        let e = evaluate_raw(&grid, &["A1", "*", "(", "B2", "-", "0.5", ")"]);
        assert_eq!(e, Evaluation { result: 20.0, error: None });
    }

    #[test]
    fn test_referenced_error_propagates() {
        let grid = grid_of(&[("A1", "1 / 0", 0.0)]);
        grid.get_mut(&CellRef::new(0, 0)).unwrap().error = Some(ErrorKind::DivideByZero);
        let e = evaluate_raw(&grid, &["A1", "+", "1"]);
        assert_eq!(e.error, Some(ErrorKind::DivideByZero));
    }

    #[test]
    fn test_empty_formula_error_on_reference_becomes_invalid_cell() {
        let grid = grid_of(&[("A1", "", 3.0)]);
        grid.get_mut(&CellRef::new(0, 0)).unwrap().error = Some(ErrorKind::EmptyFormula);
        let e = evaluate_raw(&grid, &["A1"]);
        assert_eq!(e.error, Some(ErrorKind::InvalidCell));
    }

    #[test]
    fn test_repeated_evaluation_is_deterministic() {
        let grid = grid_of(&[("A1", "2", 2.0)]);
        let evaluator = Evaluator::new(&grid);
        let formula = Token::classify_all(&["A1", "*", "(", "3", "+", "A1", ")"]);
        let first = evaluator.evaluate(&formula);
        for _ in 0..5 {
            assert_eq!(evaluator.evaluate(&formula), first);
        }
        assert_eq!(first.result, 10.0);
    }

    #[test]
    fn test_error_does_not_leak_into_next_evaluation() {
        let grid = Grid::new();
        let evaluator = Evaluator::new(&grid);
        let bad = evaluator.evaluate(&Token::classify_all(&["1", "/", "0"]));
        assert!(!bad.is_ok());
        let good = evaluator.evaluate(&Token::classify_all(&["1", "/", "4"]));
        assert_eq!(good, Evaluation { result: 0.25, error: None });
    }

    #[test]
    fn test_tokenize_then_evaluate() {
        let raw = tokenize("(1.5 + 2.5) * 3 - 4 / 2");
        assert_eq!(eval(&raw.iter().map(String::as_str).collect::<Vec<_>>()).result, 10.0);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }
}
