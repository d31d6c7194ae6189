//! Execution-equivalence check between two query results.
//!
//! Row order out of a SQL engine is not stable across plans, so the check is
//! order-insensitive on the measured column — by convention the last output
//! column (a count, sum, or average alias). Textual multiset equality is
//! tried first so agreeing strings never reach the tolerance path.

use askdb_backend::{QueryResult, Value};

/// Absolute tolerance when the measured columns are compared numerically.
/// Absorbs rounding and precision drift (day counts, currency rounding).
pub const RESULT_TOLERANCE: f64 = 1.0;

/// Decide whether two results are the same answer.
///
/// Rules, in order, short-circuiting on the first that decides:
/// 1. either result absent: no match
/// 2. both empty: match
/// 3. differing row counts: no match
/// 4. last columns equal as sorted text sequences: match
/// 5. every last-column cell parses as a number on both sides and the sorted
///    sequences pairwise differ by less than [`RESULT_TOLERANCE`]: match
///
/// Symmetric in its arguments and never panics; cells that refuse to parse
/// (nulls included) simply fail rule 5.
pub fn results_match(generated: Option<&QueryResult>, reference: Option<&QueryResult>) -> bool {
    let (generated, reference) = match (generated, reference) {
        (Some(g), Some(r)) => (g, r),
        _ => return false,
    };

    if generated.is_empty() && reference.is_empty() {
        return true;
    }
    if generated.row_count() != reference.row_count() {
        return false;
    }

    let (gen_col, ref_col) = match (generated.last_column(), reference.last_column()) {
        (Some(g), Some(r)) => (g, r),
        _ => return false,
    };

    let mut gen_text: Vec<String> = gen_col.iter().map(|v| v.render()).collect();
    let mut ref_text: Vec<String> = ref_col.iter().map(|v| v.render()).collect();
    gen_text.sort();
    ref_text.sort();
    if gen_text == ref_text {
        return true;
    }

    numeric_match(&gen_col, &ref_col)
}

fn numeric_match(generated: &[&Value], reference: &[&Value]) -> bool {
    let (mut gen_nums, mut ref_nums) = match (parse_all(generated), parse_all(reference)) {
        (Some(g), Some(r)) => (g, r),
        _ => return false,
    };

    gen_nums.sort_by(|a, b| a.total_cmp(b));
    ref_nums.sort_by(|a, b| a.total_cmp(b));

    gen_nums
        .iter()
        .zip(&ref_nums)
        .all(|(a, b)| (a - b).abs() < RESULT_TOLERANCE)
}

fn parse_all(values: &[&Value]) -> Option<Vec<f64>> {
    values.iter().map(|v| v.as_f64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(values: Vec<Value>) -> QueryResult {
        QueryResult {
            columns: vec!["total".to_string()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    fn ints(values: &[i64]) -> QueryResult {
        result(values.iter().map(|v| Value::Int(*v)).collect())
    }

    fn floats(values: &[f64]) -> QueryResult {
        result(values.iter().map(|v| Value::Float(*v)).collect())
    }

    #[test]
    fn identical_single_values_match() {
        let a = ints(&[10]);
        let b = ints(&[10]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn either_absent_never_matches() {
        let a = ints(&[1]);
        assert!(!results_match(None, Some(&a)));
        assert!(!results_match(Some(&a), None));
        assert!(!results_match(None, None));
    }

    #[test]
    fn both_empty_match() {
        let a = result(vec![]);
        let b = QueryResult::default();
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn differing_row_counts_never_match() {
        let a = ints(&[1, 2, 3]);
        let b = ints(&[1, 2]);
        assert!(!results_match(Some(&a), Some(&b)));
        assert!(!results_match(Some(&b), Some(&a)));
    }

    #[test]
    fn row_order_is_ignored() {
        let a = ints(&[3, 1, 2]);
        let b = ints(&[1, 2, 3]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn text_multiset_equality_matches() {
        let a = result(vec![
            Value::Text("credit_card".to_string()),
            Value::Text("boleto".to_string()),
        ]);
        let b = result(vec![
            Value::Text("boleto".to_string()),
            Value::Text("credit_card".to_string()),
        ]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn numeric_drift_inside_tolerance_matches() {
        let a = floats(&[100.0]);
        let b = floats(&[100.5]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn numeric_drift_at_or_past_tolerance_fails() {
        let a = floats(&[100.0]);
        assert!(!results_match(Some(&a), Some(&floats(&[102.0]))));
        // strict inequality: exactly 1.0 apart is a mismatch
        assert!(!results_match(Some(&a), Some(&floats(&[101.0]))));
    }

    #[test]
    fn typed_differently_but_numerically_close_matches() {
        // Int 100 renders "100", Text "100.2" doesn't, so this exercises
        // the numeric fallback across cell kinds.
        let a = ints(&[100]);
        let b = result(vec![Value::Text("100.2".to_string())]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn only_last_column_is_compared() {
        let a = QueryResult {
            columns: vec!["city".to_string(), "total".to_string()],
            rows: vec![vec![Value::Text("sp".to_string()), Value::Int(5)]],
        };
        let b = QueryResult {
            columns: vec!["customer_city".to_string(), "n".to_string()],
            rows: vec![vec![Value::Text("sao paulo".to_string()), Value::Int(5)]],
        };
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn matching_nulls_match_textually() {
        let a = result(vec![Value::Null, Value::Int(5)]);
        let b = result(vec![Value::Int(5), Value::Null]);
        assert!(results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn unmatched_null_fails_numeric_parse() {
        let a = result(vec![Value::Null]);
        let b = ints(&[5]);
        assert!(!results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn non_numeric_text_mismatch_fails() {
        let a = result(vec![Value::Text("delivered".to_string())]);
        let b = result(vec![Value::Text("shipped".to_string())]);
        assert!(!results_match(Some(&a), Some(&b)));
    }

    #[test]
    fn zero_column_rows_do_not_panic() {
        let a = QueryResult {
            columns: vec![],
            rows: vec![vec![], vec![]],
        };
        let b = ints(&[1, 2]);
        assert!(!results_match(Some(&a), Some(&b)));
        assert!(!results_match(Some(&b), Some(&a)));
    }

    #[test]
    fn comparison_is_symmetric() {
        let a = floats(&[10.4]);
        let b = ints(&[10]);
        assert_eq!(
            results_match(Some(&a), Some(&b)),
            results_match(Some(&b), Some(&a))
        );
    }
}
