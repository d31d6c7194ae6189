//! Labeled evaluation dataset: questions, reference SQL, difficulty tiers.

use crate::EvalError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Difficulty tier attached to each evaluation question, used for
/// stratified accuracy reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Simple,
    Medium,
    Complex,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Simple, Difficulty::Medium, Difficulty::Complex];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Simple => "simple",
            Difficulty::Medium => "medium",
            Difficulty::Complex => "complex",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One labeled question: natural-language text plus its human-written
/// reference statement.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalCase {
    pub question: String,
    pub sql: String,
    pub difficulty: Difficulty,
}

/// Load a JSON array of evaluation cases from disk.
///
/// Malformed records are load-time errors: a missing field or a difficulty
/// label outside {simple, medium, complex} rejects the whole file before any
/// generation work starts.
pub fn load_dataset(path: &Path) -> Result<Vec<EvalCase>, EvalError> {
    let content = std::fs::read_to_string(path).map_err(|source| EvalError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| EvalError::DatasetParse {
        path: path.to_path_buf(),
        source,
    })
}
