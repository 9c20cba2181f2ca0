use super::Evaluation;

/// Number rendering options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberFormat {
    /// Decimal places for non-integral values.
    pub decimals: usize,
    /// Integral values smaller than this in magnitude print without decimals.
    pub integer_limit: f64,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            decimals: 2,
            integer_limit: 1e10,
        }
    }
}

/// Format an evaluation for display: the error message if there is one,
/// otherwise the number.
pub fn format_evaluation(evaluation: &Evaluation, fmt: &NumberFormat) -> String {
    match evaluation.error {
        Some(kind) => kind.message().to_string(),
        None => format_number(evaluation.result, fmt),
    }
}

/// Format a number for display.
pub fn format_number(n: f64, fmt: &NumberFormat) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < fmt.integer_limit {
        format!("{:.0}", n)
    } else {
        format!("{:.*}", fmt.decimals, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ErrorKind;

    #[test]
    fn test_format_number() {
        let fmt = NumberFormat::default();
        assert_eq!(format_number(7.0, &fmt), "7");
        assert_eq!(format_number(2.0 / 3.0, &fmt), "0.67");
        assert_eq!(format_number(f64::INFINITY, &fmt), "#INF!");
        assert_eq!(format_number(1e12, &fmt), "1000000000000.00");
    }

    #[test]
    fn test_format_evaluation_prefers_error() {
        let fmt = NumberFormat { decimals: 4, integer_limit: 1e10 };
        let failed = Evaluation { result: f64::INFINITY, error: Some(ErrorKind::DivideByZero) };
        assert_eq!(format_evaluation(&failed, &fmt), "#DIV/0!");
        let ok = Evaluation { result: 0.125, error: None };
        assert_eq!(format_evaluation(&ok, &fmt), "0.1250");
    }
}
