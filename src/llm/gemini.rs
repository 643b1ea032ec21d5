use reqwest::Client;
use tracing::{debug, warn};

use super::types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::{REQUEST_TIMEOUT, ResponseSchema, StructuredClient, body_snippet, classify_status};
use crate::config::{ApiKey, ProviderConfig};
use crate::error::ServiceError;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: Client, provider: &ProviderConfig) -> Self {
        Self {
            http,
            api_key: provider.api_key.clone(),
            model: provider.model.clone(),
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        let provider = crate::config::test_config(&[], 1, "unused".into()).provider;
        Self {
            base_url: base_url.to_string(),
            ..Self::new(http, &provider)
        }
    }

    async fn generate_content(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<GenerateContentResponse, ServiceError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: Some("user".to_string()),
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_json_schema: &schema.schema,
            },
        };

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Gemini API rate limited");
            return Err(ServiceError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<GenerateContentResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err);
                warn!(error = %classified, "Gemini API error");
                return Err(classified);
            }
            warn!(status = %status, "Gemini API error (no structured body)");
            return Err(ServiceError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", body_snippet(&text)),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        debug!(model = %self.model, schema = schema.name, "gemini generation complete");

        if let Some(err) = &body.error {
            let classified = classify_api_error(err);
            warn!(error = %classified, "Gemini API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }
}

impl StructuredClient for GeminiClient {
    async fn generate(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, ServiceError> {
        let response = self.generate_content(prompt, schema).await?;
        extract_text(&response).ok_or(ServiceError::EmptyResponse)
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: &GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.as_ref().and_then(|c| c.first())?;

    let text: String = candidate
        .content
        .as_ref()
        .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        warn!(
            finish_reason = candidate.finish_reason.as_deref().unwrap_or("unknown"),
            "Gemini returned empty text (safety filter or empty response)"
        );
        return None;
    }
    Some(text)
}

fn classify_api_error(err: &ApiError) -> ServiceError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code {
        Some(code) => classify_status(code, message),
        None => ServiceError::Api {
            code: 0,
            message: format!("Unknown error (no status code): {message}"),
        },
    }
}
