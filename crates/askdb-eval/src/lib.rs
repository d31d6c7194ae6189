//! Evaluation engine: result comparison, dataset handling, accuracy
//! aggregation, and the batch driver that ties them together.

mod compare;
mod dataset;
mod report;
mod runner;

pub use compare::{results_match, RESULT_TOLERANCE};
pub use dataset::{load_dataset, Difficulty, EvalCase};
pub use report::{AccuracyReport, Tally};
pub use runner::{run_evaluation, CaseResult, EvaluationOutcome};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing an evaluation run.
#[derive(Error, Debug)]
pub enum EvalError {
    /// The dataset file could not be read.
    #[error("Failed to read evaluation dataset {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a well-formed array of labeled questions.
    /// Unknown difficulty labels and missing fields land here too: records
    /// are validated at load time, before any generation work starts.
    #[error("Malformed evaluation dataset {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
