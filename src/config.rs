//! Runtime configuration.
//!
//! Settings come from the environment (and CLI flags layered on top):
//!
//! | Setting | Variable | Default |
//! |---|---|---|
//! | database path | `CRICKET_QA_DB` | `./database/cricket_data.db` |
//! | model | `CRICKET_QA_LLM` | `gpt-3.5-turbo` |
//! | credential | `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` | none |
//! | LLM timeout | `CRICKET_QA_LLM_TIMEOUT_SECS` | 10 |

use crate::types::{QaError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_PATH_ENV: &str = "CRICKET_QA_DB";
pub const MODEL_ENV: &str = "CRICKET_QA_LLM";
pub const TIMEOUT_ENV: &str = "CRICKET_QA_LLM_TIMEOUT_SECS";
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub const DEFAULT_DB_PATH: &str = "./database/cricket_data.db";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 10;

/// Process-wide settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file
    pub db_path: PathBuf,
    /// LLM model name (provider is inferred from its prefix)
    pub model: String,
    /// Provider credential, if one was found
    pub api_key: Option<String>,
    /// Upper bound on one LLM round trip
    pub llm_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build configuration from environment variables.
    ///
    /// A missing credential is not an error here; it surfaces as
    /// `QaError::ConfigError` from [`Config::api_key`] when the model
    /// strategy is constructed.
    ///
    /// # Errors
    ///
    /// Returns `QaError::ConfigError` if the timeout is not a positive integer
    pub fn from_env() -> Result<Self> {
        let db_path = std::env::var(DB_PATH_ENV).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let model = std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let llm_timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        };

        let api_key = std::env::var(credential_env(&model)).ok().filter(|k| !k.is_empty());

        Ok(Self {
            db_path: expand_path(&db_path),
            model,
            api_key,
            llm_timeout,
        })
    }

    /// Override the database path (tilde-expanded).
    pub fn with_db_path(mut self, path: &str) -> Self {
        self.db_path = expand_path(path);
        self
    }

    /// Override the model; the credential is re-read for the new provider.
    pub fn with_model(mut self, model: &str) -> Self {
        if credential_env(model) != credential_env(&self.model) {
            self.api_key = std::env::var(credential_env(model)).ok().filter(|k| !k.is_empty());
        }
        self.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Provider credential.
    ///
    /// # Errors
    ///
    /// Returns `QaError::ConfigError` naming the variable that must be set
    pub fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            QaError::ConfigError(format!(
                "{} environment variable not set",
                credential_env(&self.model)
            ))
        })
    }
}

/// Environment variable holding the credential for `model`'s provider.
pub fn credential_env(model: &str) -> &'static str {
    if model.starts_with("claude") || model.starts_with("anthropic") {
        ANTHROPIC_KEY_ENV
    } else {
        OPENAI_KEY_ENV
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(QaError::ConfigError(format!(
            "{} must be a positive number of seconds, got '{}'",
            TIMEOUT_ENV, raw
        ))),
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_env_by_prefix() {
        assert_eq!(credential_env("gpt-3.5-turbo"), OPENAI_KEY_ENV);
        assert_eq!(credential_env("claude-3-5-haiku-latest"), ANTHROPIC_KEY_ENV);
        assert_eq!(credential_env("something-else"), OPENAI_KEY_ENV);
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = Config::default();
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, QaError::ConfigError(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_present_key() {
        let config = Config {
            api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("4").unwrap(), Duration::from_secs(4));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_with_db_path_expands_tilde() {
        let config = Config::default().with_db_path("/tmp/cricket.db");
        assert_eq!(config.db_path, PathBuf::from("/tmp/cricket.db"));
    }
}
