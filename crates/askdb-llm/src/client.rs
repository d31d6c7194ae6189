//! Completion-service client.

use crate::GenerateError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Completion calls that run longer than this are treated as failed.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings for the completion service and sampling.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Generation endpoint, e.g. `http://localhost:11434/api/generate`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Target model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature. 0.0 asks the service for its most likely
    /// continuation rather than a sampled one.
    #[serde(default)]
    pub temperature: f32,

    /// Maximum completion length in tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// How many times a transport failure is retried before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model() -> String {
    "mistral".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

fn default_max_retries() -> u32 {
    2
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            max_retries: default_max_retries(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: CompletionOptions,
}

#[derive(Serialize)]
struct CompletionOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    response: String,
}

/// Client for an Ollama-style `/api/generate` endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl OllamaClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Send a prompt and return the trimmed completion text.
    ///
    /// Transport failures are retried up to the configured `max_retries`;
    /// service-level failures (bad status, unparseable body) are not, since
    /// a repeat request would fail the same way.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = CompletionRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: CompletionOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        let mut attempt = 0;
        loop {
            match self.try_complete(&request).await {
                Ok(text) => return Ok(text),
                Err(GenerateError::Transport(err)) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(
                        "completion transport error, retrying ({}/{}): {}",
                        attempt, self.config.max_retries, err
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_complete(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<String, GenerateError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::MalformedResponse(e.to_string()))?;

        Ok(parsed.response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "mistral");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 200);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_request_body_shape() {
        let request = CompletionRequest {
            model: "mistral",
            prompt: "Q: how many orders?",
            stream: false,
            options: CompletionOptions {
                temperature: 0.0,
                num_predict: 200,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "mistral");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
        assert_eq!(json["options"]["num_predict"], 200);
    }
}
