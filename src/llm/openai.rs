use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::llm::client::{
    build_http_client, check_status, request_failed, require_api_key, setting_or, LlmProvider,
};
use crate::llm::prompts::PromptPayload;
use crate::{InsightsError, Result};

const PROVIDER: &str = "OpenAI";
const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

pub struct OpenAiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f64,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = require_api_key(settings, PROVIDER)?;

        Ok(Self {
            http: build_http_client(settings, PROVIDER)?,
            api_key,
            model: setting_or(&settings.llm.model, DEFAULT_OPENAI_MODEL),
            endpoint: setting_or(&settings.llm.endpoint, DEFAULT_OPENAI_ENDPOINT),
            temperature: settings.llm.temperature,
            max_tokens: settings.llm.max_output_tokens,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LlmProvider for OpenAiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, prompt: &PromptPayload) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::info!("Requesting insights from {} ({})", PROVIDER, self.model);

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| request_failed(PROVIDER, e))?;

        let response = check_status(response, PROVIDER).await?;

        let payload: ChatCompletionResponse = response.json().await.map_err(|e| {
            InsightsError::Service(format!("Failed to parse {} response: {}", PROVIDER, e))
        })?;

        payload
            .choices
            .into_iter()
            .filter_map(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .find(|t| !t.is_empty())
            .ok_or_else(|| {
                InsightsError::Service(format!("{} response did not contain any text", PROVIDER))
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: ResponseFormat,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
