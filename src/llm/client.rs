use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use std::time::Duration;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::insights::{parse_insight_sections, InsightSections};
use crate::llm::openai::OpenAiClient;
use crate::llm::prompts::PromptPayload;
use crate::{InsightsError, Result};

/// Longest error body excerpt carried into a service error
const ERROR_BODY_LIMIT: usize = 300;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Send the prompt and return the model's raw text output.
    async fn complete(&self, prompt: &PromptPayload) -> Result<String>;

    /// Send the prompt and parse the reply into insight sections.
    async fn generate_insights(&self, prompt: &PromptPayload) -> Result<InsightSections> {
        let raw = self.complete(prompt).await?;
        tracing::debug!("{} returned {} chars", self.name(), raw.len());
        parse_insight_sections(&raw)
    }
}

/// Build an LLM provider from runtime settings.
pub fn build_provider(settings: &Settings) -> Result<Box<dyn LlmProvider>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "openai" => Ok(Box::new(OpenAiClient::from_settings(settings)?)),
        "gemini" => Ok(Box::new(GeminiClient::from_settings(settings)?)),
        other => Err(InsightsError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: openai, gemini",
            other
        ))),
    }
}

/// Validate the API key from settings, naming where it can be configured.
pub(crate) fn require_api_key(settings: &Settings, provider: &str) -> Result<String> {
    let api_key = settings.llm.api_key.trim().to_string();
    if api_key.is_empty() {
        let env_hint = settings.api_key_env_var().unwrap_or("the provider key variable");
        return Err(InsightsError::Config(format!(
            "{} API key is missing. Set llm.api_key in config or {}.",
            provider, env_hint
        )));
    }
    Ok(api_key)
}

/// Pick the configured value, or the fallback when blank.
pub(crate) fn setting_or(value: &str, fallback: &str) -> String {
    let value = value.trim().trim_end_matches('/');
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn build_http_client(settings: &Settings, provider: &str) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.llm.timeout_secs))
        .build()
        .map_err(|e| InsightsError::Config(format!("Failed to build {} HTTP client: {}", provider, e)))
}

/// Map transport failures into service errors.
pub(crate) fn request_failed(provider: &str, err: reqwest::Error) -> InsightsError {
    if err.is_timeout() {
        InsightsError::Service(format!("{} request timed out", provider))
    } else {
        InsightsError::Service(format!("{} request failed: {}", provider, err))
    }
}

/// Turn a non-success HTTP status into a service error.
pub(crate) async fn check_status(response: Response, provider: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(InsightsError::Service(format!(
            "{} rejected the API key (HTTP {})",
            provider,
            status.as_u16()
        )));
    }

    let body = response.text().await.unwrap_or_default();
    let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
    Err(InsightsError::Service(format!(
        "{} returned HTTP {}: {}",
        provider,
        status.as_u16(),
        excerpt.trim()
    )))
}
