use reqwest::Client;
use tracing::{debug, warn};

use super::types::{ChatMessage, ChatRequest, ChatResponse, JsonSchemaFormat, ResponseFormat};
use super::{REQUEST_TIMEOUT, ResponseSchema, StructuredClient, body_snippet, classify_status};
use crate::config::{ApiKey, ProviderConfig};
use crate::error::ServiceError;

const API_BASE: &str = "https://api.openai.com/v1";
const SYSTEM_PROMPT: &str =
    "You are a patient English tutor for a Portuguese-speaking learner. Reply only with JSON.";

/// Client for OpenAI and servers exposing a compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, provider: &ProviderConfig) -> Self {
        let base_url = provider
            .base_url
            .as_deref()
            .unwrap_or(API_BASE)
            .trim_end_matches('/')
            .to_string();
        Self {
            http,
            api_key: provider.api_key.clone(),
            model: provider.model.clone(),
            base_url,
        }
    }

    async fn chat(&self, prompt: &str, schema: &ResponseSchema) -> Result<ChatResponse, ServiceError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: schema.name,
                    strict: true,
                    schema: &schema.schema,
                },
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ChatResponse>(&text)
                .ok()
                .and_then(|body| body.error)
                .and_then(|err| err.message)
                .unwrap_or_else(|| format!("HTTP {status}: {}", body_snippet(&text)));
            let classified = classify_status(status.as_u16(), message);
            warn!(error = %classified, "OpenAI API error");
            return Err(classified);
        }

        let body: ChatResponse = response.json().await?;
        debug!(model = %self.model, schema = schema.name, "openai generation complete");
        Ok(body)
    }
}

impl StructuredClient for OpenAiClient {
    async fn generate(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, ServiceError> {
        let response = self.chat(prompt, schema).await?;
        extract_content(response)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, ServiceError> {
    let message = response
        .choices
        .and_then(|choices| choices.into_iter().next())
        .and_then(|choice| choice.message)
        .ok_or(ServiceError::EmptyResponse)?;

    if let Some(refusal) = message.refusal.filter(|r| !r.is_empty()) {
        warn!(%refusal, "model refused the request");
        return Err(ServiceError::InvalidResponse(format!("model refused: {refusal}")));
    }

    message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(ServiceError::EmptyResponse)
}
