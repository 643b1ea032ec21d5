//! Structured-output text generation: Gemini and OpenAI-compatible backends behind one trait.

pub(crate) mod gemini;
pub(crate) mod openai;
pub(crate) mod types;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::ServiceError;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const ERROR_SNIPPET_BYTES: usize = 200;

/// JSON schema the model reply must conform to.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
}

/// A generation backend that answers a prompt with JSON text shaped by `schema`.
/// Implemented by `GeminiClient` and `OpenAiClient`; mock implementations used in tests.
pub trait StructuredClient {
    async fn generate(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, ServiceError>;
}

/// The backend selected by configuration.
#[derive(Debug, Clone)]
pub enum LlmClient {
    Gemini(GeminiClient),
    OpenAi(OpenAiClient),
}

impl LlmClient {
    pub fn from_config(http: Client, provider: &ProviderConfig) -> Self {
        match provider.kind {
            ProviderKind::Gemini => Self::Gemini(GeminiClient::new(http, provider)),
            ProviderKind::OpenAi => Self::OpenAi(OpenAiClient::new(http, provider)),
        }
    }
}

impl StructuredClient for LlmClient {
    async fn generate(&self, prompt: &str, schema: &ResponseSchema) -> Result<String, ServiceError> {
        match self {
            Self::Gemini(client) => client.generate(prompt, schema).await,
            Self::OpenAi(client) => client.generate(prompt, schema).await,
        }
    }
}

fn classify_status(code: u16, message: String) -> ServiceError {
    match code {
        429 => ServiceError::RateLimited,
        403 => ServiceError::QuotaExhausted(message),
        _ => ServiceError::Api { code, message },
    }
}

fn body_snippet(text: &str) -> &str {
    if text.len() > ERROR_SNIPPET_BYTES {
        &text[..text.floor_char_boundary(ERROR_SNIPPET_BYTES)]
    } else {
        text
    }
}
