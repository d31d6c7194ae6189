//! Natural-language-to-SQL generation via a local completion service.
//!
//! The generator assembles a fixed instruction template (schema description,
//! worked examples, rules, question), sends it to an Ollama-style completion
//! endpoint, and extracts a single SQL statement from the raw completion.
//! No semantic validation happens here; whether the statement is any good is
//! decided by the executor at execution time.

mod client;
mod extract;
mod prompt;

pub use client::{LlmConfig, OllamaClient};
pub use extract::{exact_match, extract_sql, normalize_sql};
pub use prompt::build_prompt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the completion service.
///
/// These replace the upstream convention of smuggling an `ERROR: ...` string
/// through the SQL channel; callers branch on the variant and report the
/// text, and the question flows into the normal failure path.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The service was unreachable or the request timed out.
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("completion service returned status {status}: {body}")]
    Service { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Anything that can turn a question into a SQL statement.
///
/// The evaluation driver and front ends depend on this seam rather than on
/// the concrete client, so they can be exercised with canned generators.
#[async_trait]
pub trait TextToSql: Send + Sync {
    async fn generate_sql(&self, question: &str) -> Result<String, GenerateError>;
}

/// Template-prompted generator backed by an Ollama-style completion endpoint.
pub struct SqlGenerator {
    client: OllamaClient,
}

impl SqlGenerator {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: OllamaClient::new(config),
        }
    }
}

#[async_trait]
impl TextToSql for SqlGenerator {
    async fn generate_sql(&self, question: &str) -> Result<String, GenerateError> {
        let prompt = build_prompt(question);
        let completion = self.client.complete(&prompt).await?;
        Ok(extract_sql(&completion))
    }
}
