//! Completion-text cleanup: pull one SQL statement out of free-form output.

/// Extract a single SQL statement from raw completion text.
///
/// Preference order: the first ```sql fenced block, else the first generic
/// fenced block, else the whole response. Blank lines and `--` comment lines
/// are dropped, the survivors are collapsed onto one line, and anything after
/// the first `;` is discarded so exactly one statement comes back even when
/// the completion contained several.
pub fn extract_sql(response: &str) -> String {
    let text = response.trim();

    let body = if let Some(start) = text.find("```sql") {
        let rest = &text[start + 6..];
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else if let Some(start) = text.find("```") {
        let rest = &text[start + 3..];
        match rest.find("```") {
            Some(end) => &rest[..end],
            None => rest,
        }
    } else {
        text
    };

    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--"))
        .collect();
    let mut sql = lines.join(" ");

    if let Some(pos) = sql.find(';') {
        sql.truncate(pos + 1);
    }

    sql
}

/// Normalize a statement for textual comparison: lowercase, collapse
/// whitespace, strip the trailing terminator. Idempotent.
pub fn normalize_sql(sql: &str) -> String {
    let lowered = sql.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches(';').trim_end().to_string()
}

/// Whether two statements are textually identical after normalization.
pub fn exact_match(a: &str, b: &str) -> bool {
    normalize_sql(a) == normalize_sql(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_takes_first_statement_only() {
        assert_eq!(
            extract_sql("SELECT * FROM a; SELECT * FROM b;"),
            "SELECT * FROM a;"
        );
    }

    #[test]
    fn extract_strips_sql_fence() {
        assert_eq!(
            extract_sql("```sql\nSELECT COUNT(*) FROM orders;\n```"),
            "SELECT COUNT(*) FROM orders;"
        );
    }

    #[test]
    fn extract_prefers_sql_fence_over_generic() {
        let response = "```\nnot this\n```\n```sql\nSELECT 1;\n```";
        assert_eq!(extract_sql(response), "SELECT 1;");
    }

    #[test]
    fn extract_strips_generic_fence() {
        assert_eq!(
            extract_sql("Here you go:\n```\nSELECT 1;\n```\nHope that helps!"),
            "SELECT 1;"
        );
    }

    #[test]
    fn extract_handles_unclosed_fence() {
        assert_eq!(extract_sql("```sql\nSELECT 1;"), "SELECT 1;");
    }

    #[test]
    fn extract_drops_comment_and_blank_lines() {
        let response = "-- count all orders\n\nSELECT COUNT(*)\nFROM orders;\n";
        assert_eq!(extract_sql(response), "SELECT COUNT(*) FROM orders;");
    }

    #[test]
    fn extract_collapses_multiline_statement() {
        let response = "SELECT payment_type,\n       COUNT(*) as n\nFROM payments\nGROUP BY payment_type;";
        assert_eq!(
            extract_sql(response),
            "SELECT payment_type, COUNT(*) as n FROM payments GROUP BY payment_type;"
        );
    }

    #[test]
    fn extract_without_terminator_passes_through() {
        assert_eq!(extract_sql("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn extract_empty_response() {
        assert_eq!(extract_sql(""), "");
        assert_eq!(extract_sql("   \n  "), "");
    }

    #[test]
    fn normalize_is_case_and_whitespace_insensitive() {
        assert_eq!(
            normalize_sql("SELECT * FROM Orders"),
            normalize_sql("select * from orders")
        );
        assert_eq!(
            normalize_sql("  select   1  ;"),
            normalize_sql("SELECT 1")
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_sql("SELECT  COUNT(*)  FROM orders;");
        assert_eq!(normalize_sql(&once), once);
    }

    #[test]
    fn exact_match_ignores_surface_differences() {
        assert!(exact_match("SELECT * FROM Orders;", "select * from orders"));
        assert!(!exact_match("SELECT 1", "SELECT 2"));
    }
}
