//! Batch evaluation driver: generate, execute both sides, compare, tally.

use crate::{results_match, AccuracyReport, Difficulty, EvalCase};
use askdb_backend::Database;
use askdb_llm::TextToSql;
use log::debug;

/// Outcome of a single evaluation case.
#[derive(Debug)]
pub struct CaseResult {
    pub question: String,
    pub difficulty: Difficulty,
    /// The extracted statement, when generation got that far.
    pub generated_sql: Option<String>,
    pub passed: bool,
    /// Generation or execution failure text, when one occurred.
    pub error: Option<String>,
}

/// Full outcome of one evaluation run: per-case verdicts in input order plus
/// the aggregated report.
#[derive(Debug)]
pub struct EvaluationOutcome {
    pub report: AccuracyReport,
    pub cases: Vec<CaseResult>,
}

/// Run every case in input order, sequentially.
///
/// A case counts as incorrect when generation or either execution fails;
/// one failure never aborts the batch, so a partial run still yields a
/// well-formed report covering every processed question.
pub async fn run_evaluation(
    backend: &dyn Database,
    generator: &dyn TextToSql,
    cases: &[EvalCase],
) -> EvaluationOutcome {
    let mut report = AccuracyReport::new();
    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        let result = evaluate_case(backend, generator, case).await;
        report.record(case.difficulty, result.passed);
        results.push(result);
    }

    EvaluationOutcome {
        report,
        cases: results,
    }
}

async fn evaluate_case(
    backend: &dyn Database,
    generator: &dyn TextToSql,
    case: &EvalCase,
) -> CaseResult {
    let generated_sql = match generator.generate_sql(&case.question).await {
        Ok(sql) => sql,
        Err(err) => {
            debug!("generation failed for {:?}: {}", case.question, err);
            return CaseResult {
                question: case.question.clone(),
                difficulty: case.difficulty,
                generated_sql: None,
                passed: false,
                error: Some(err.to_string()),
            };
        }
    };

    let generated = backend.execute_sql(&generated_sql).await;
    let reference = backend.execute_sql(&case.sql).await;

    match (generated, reference) {
        (Ok(generated), Ok(reference)) => {
            let passed = results_match(Some(&generated), Some(&reference));
            debug!(
                "{:?} -> {} ({})",
                case.question,
                generated_sql,
                if passed { "match" } else { "mismatch" }
            );
            CaseResult {
                question: case.question.clone(),
                difficulty: case.difficulty,
                generated_sql: Some(generated_sql),
                passed,
                error: None,
            }
        }
        (Err(err), _) | (_, Err(err)) => CaseResult {
            question: case.question.clone(),
            difficulty: case.difficulty,
            generated_sql: Some(generated_sql),
            passed: false,
            error: Some(err.to_string()),
        },
    }
}
