use crate::errors::CliError;
use anyhow::Result;
use askdb_llm::LlmConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Process-wide settings, loaded once at startup and passed by reference
/// into the executor and generator.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// DuckDB database file.
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Labeled evaluation dataset (JSON array of question/sql/difficulty).
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,

    /// Completion service settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// HTTP API settings.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_database() -> PathBuf {
    PathBuf::from("data/ecommerce.duckdb")
}

fn default_dataset() -> PathBuf {
    PathBuf::from("data/test_questions.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            dataset: default_dataset(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::ConfigLoadError {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            CliError::ConfigLoadError {
                path: path.to_path_buf(),
                source: e.into(),
            }
            .into()
        })
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_deserialization() {
        let yaml = r#"
database: db/shop.duckdb
dataset: db/questions.json
llm:
  endpoint: http://127.0.0.1:11434/api/generate
  model: llama3
  temperature: 0.0
  max_tokens: 300
  max_retries: 1
server:
  host: 127.0.0.1
  port: 9000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database, PathBuf::from("db/shop.duckdb"));
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.llm.max_tokens, 300);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "database: custom.duckdb\n";

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database, PathBuf::from("custom.duckdb"));
        assert_eq!(config.dataset, PathBuf::from("data/test_questions.json"));
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/no/such/askdb.yml")).unwrap();
        assert_eq!(config.database, default_database());
    }
}
