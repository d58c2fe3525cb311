//! Natural language to SQL via a chat-completion endpoint.

use crate::config::Config;
use crate::llm::planner::{ModelQuery, QueryModel};
use crate::schema::SchemaDescriptor;
use crate::telemetry::llm_span;
use crate::types::{QaError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::Instrument;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// LLM provider type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Infer the provider from the model name.
    pub fn for_model(model: &str) -> Self {
        if model.starts_with("claude") || model.starts_with("anthropic") {
            LlmProvider::Anthropic
        } else {
            LlmProvider::OpenAI
        }
    }
}

/// LLM-powered query builder.
pub struct LlmQueryBuilder {
    api_key: String,
    model: String,
    provider: LlmProvider,
    client: Client,
}

/// OpenAI chat completion response.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

/// Anthropic messages response.
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}

impl LlmQueryBuilder {
    /// Create a new query builder.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Provider credential
    /// * `model` - Model name (e.g., "gpt-3.5-turbo", "claude-3-5-haiku-latest")
    /// * `timeout` - Bound on one request, connect through body
    ///
    /// # Errors
    ///
    /// Returns `QaError::ConfigError` if the HTTP client cannot be built
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QaError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider: LlmProvider::for_model(&model),
            api_key,
            model,
            client,
        })
    }

    /// Create from configuration.
    ///
    /// # Errors
    ///
    /// Returns `QaError::ConfigError` if the provider credential is missing
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?.to_string();
        Self::new(api_key, config.model.clone(), config.llm_timeout)
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Strip markdown code fences from a model reply.
    ///
    /// Handles ```` ```json ... ``` ````, ```` ```JSON ... ``` ```` and bare ```` ``` ... ``` ````.
    fn strip_markdown(text: &str) -> String {
        let text = text.trim();

        if text.starts_with("```") {
            let start = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
            let end = text.rfind("```").filter(|&i| i >= start).unwrap_or(text.len());
            return text[start..end].trim().to_string();
        }

        text.to_string()
    }

    /// System prompt: role plus the schema context.
    pub fn system_prompt(schema: &SchemaDescriptor) -> String {
        format!(
            "You are a helpful assistant that maps user questions to database tables and also \
             provides human-readable explanations. Here's the schema information:\n{}",
            schema.prompt_context()
        )
    }

    /// User prompt: the verbatim question plus output-format instructions.
    pub fn user_prompt(question: &str) -> String {
        format!(
            "Which table should be queried for this question: '{}'? Please return the result as a \
             JSON object with two keys: 'sql' for the query string and 'explanation' for a \
             human-readable one liner of the result, e.g., {{\"sql\": \"SELECT * FROM table_name \
             WHERE condition;\", \"explanation\": \"This query retrieves the top player with the \
             highest runs scored.\"}}",
            question
        )
    }

    /// Call the provider and return the raw completion text.
    pub async fn call_llm(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        match self.provider {
            LlmProvider::OpenAI => self.call_openai(system_prompt, user_prompt).await,
            LlmProvider::Anthropic => self.call_anthropic(system_prompt, user_prompt).await,
        }
    }

    async fn call_openai(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(OPENAI_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system_prompt},
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": 0
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QaError::resolution(format!("OpenAI API error {}: {}", status, body)));
        }

        let parsed: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| QaError::resolution(format!("Failed to parse OpenAI response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| QaError::resolution("No response from OpenAI"))
    }

    async fn call_anthropic(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": 1024,
                "system": system_prompt,
                "messages": [
                    {"role": "user", "content": user_prompt}
                ],
                "temperature": 0
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(QaError::resolution(format!("Anthropic API error {}: {}", status, body)));
        }

        let parsed: AnthropicResponse = serde_json::from_str(&body).map_err(|e| {
            QaError::resolution(format!("Failed to parse Anthropic response: {}", e))
        })?;

        parsed
            .content
            .into_iter()
            .next()
            .map(|c| c.text)
            .ok_or_else(|| QaError::resolution("No response from Anthropic"))
    }
}

#[async_trait]
impl QueryModel for LlmQueryBuilder {
    async fn resolve_via_model(
        &self,
        question: &str,
        schema: &SchemaDescriptor,
    ) -> Result<ModelQuery> {
        let system_prompt = Self::system_prompt(schema);
        let user_prompt = Self::user_prompt(question);

        let reply = self
            .call_llm(&system_prompt, &user_prompt)
            .instrument(llm_span(&self.model))
            .await?;
        tracing::debug!(reply = %reply, "model reply");

        ModelQuery::parse(&Self::strip_markdown(&reply))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_for_model() {
        assert_eq!(LlmProvider::for_model("gpt-3.5-turbo"), LlmProvider::OpenAI);
        assert_eq!(LlmProvider::for_model("gpt-4o-mini"), LlmProvider::OpenAI);
        assert_eq!(LlmProvider::for_model("claude-3-5-haiku-latest"), LlmProvider::Anthropic);
    }

    #[test]
    fn test_strip_markdown() {
        let fenced = "```json\n{\"sql\": \"SELECT 1\", \"explanation\": \"one\"}\n```";
        assert_eq!(
            LlmQueryBuilder::strip_markdown(fenced),
            "{\"sql\": \"SELECT 1\", \"explanation\": \"one\"}"
        );

        let bare = "```\n{}\n```";
        assert_eq!(LlmQueryBuilder::strip_markdown(bare), "{}");

        let plain = "  {\"sql\": \"SELECT 1\"}  ";
        assert_eq!(LlmQueryBuilder::strip_markdown(plain), "{\"sql\": \"SELECT 1\"}");

        assert_eq!(LlmQueryBuilder::strip_markdown("```"), "");
    }

    #[test]
    fn test_prompts_embed_schema_and_question() {
        let system = LlmQueryBuilder::system_prompt(&SchemaDescriptor::cricket());
        assert!(system.contains("The database has the following tables:"));
        assert!(system.contains("Deliveries: delivery_id"));

        let user = LlmQueryBuilder::user_prompt("Who won the most tosses?");
        assert!(user.contains("'Who won the most tosses?'"));
        assert!(user.contains("'sql'"));
        assert!(user.contains("'explanation'"));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = Config::default();
        assert!(matches!(
            LlmQueryBuilder::from_config(&config),
            Err(QaError::ConfigError(_))
        ));

        let config = Config {
            api_key: Some("sk-test".to_string()),
            ..Config::default()
        };
        let builder = LlmQueryBuilder::from_config(&config).unwrap();
        assert_eq!(builder.model_name(), "gpt-3.5-turbo");
        assert_eq!(builder.provider(), LlmProvider::OpenAI);
    }
}
