//! Meaning lookup, phrase generation and translation on top of a structured-output backend.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::ServiceError;
use crate::llm::{ResponseSchema, StructuredClient};

/// The only translation target.
pub const TARGET_LANGUAGE: &str = "Brazilian Portuguese";

/// Language collaborators the pipeline depends on.
/// Implemented by `Tutor` for production; mock implementations used in tests.
pub trait LanguageService {
    async fn meaning_of(&self, word: &str) -> Result<String, ServiceError>;

    /// At most `count` example phrases, in generation order.
    async fn generate_phrases(&self, word: &str, count: u32) -> Result<Vec<String>, ServiceError>;

    async fn translate(&self, phrase: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MeaningRecord {
    meaning: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PhrasesRecord {
    phrases: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TranslationRecord {
    translation: String,
}

fn string_field_schema(name: &'static str, field: &str) -> ResponseSchema {
    ResponseSchema {
        name,
        schema: json!({
            "type": "object",
            "properties": {field: {"type": "string"}},
            "required": [field],
            "additionalProperties": false
        }),
    }
}

fn phrases_schema() -> ResponseSchema {
    ResponseSchema {
        name: "phrases",
        schema: json!({
            "type": "object",
            "properties": {
                "phrases": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["phrases"],
            "additionalProperties": false
        }),
    }
}

pub struct Tutor<C> {
    client: C,
}

impl<C: StructuredClient> Tutor<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<T, ServiceError> {
        let raw = self.client.generate(prompt, schema).await?;
        serde_json::from_str(&raw).map_err(|e| {
            ServiceError::InvalidResponse(format!("{} reply does not match schema: {e}", schema.name))
        })
    }
}

impl<C: StructuredClient> LanguageService for Tutor<C> {
    async fn meaning_of(&self, word: &str) -> Result<String, ServiceError> {
        let prompt = format!(
            "Give a short, learner-friendly English definition of the word \"{word}\". \
             Answer with a single sentence."
        );
        let record: MeaningRecord = self
            .ask(&prompt, &string_field_schema("meaning", "meaning"))
            .await?;
        let meaning = non_blank(record.meaning, "meaning")?;
        debug!(word, "meaning received");
        Ok(meaning)
    }

    async fn generate_phrases(&self, word: &str, count: u32) -> Result<Vec<String>, ServiceError> {
        let prompt = format!(
            "Write {count} different natural English example sentences that use the word \"{word}\". \
             Keep each sentence short and useful for everyday conversation."
        );
        let record: PhrasesRecord = self.ask(&prompt, &phrases_schema()).await?;
        let phrases = validate_phrases(record.phrases, count)?;
        debug!(word, phrases = phrases.len(), "phrases received");
        Ok(phrases)
    }

    async fn translate(&self, phrase: &str) -> Result<String, ServiceError> {
        let prompt = format!(
            "Translate the following English sentence into {TARGET_LANGUAGE}. \
             Keep the meaning and tone.\n\n{phrase}"
        );
        let record: TranslationRecord = self
            .ask(&prompt, &string_field_schema("translation", "translation"))
            .await?;
        non_blank(record.translation, "translation")
    }
}

/// Trimmed, non-empty, single-line value. Line breaks and tabs would split a flashcard record.
fn non_blank(value: String, field: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidResponse(format!("{field} is empty")));
    }
    if trimmed.contains(['\n', '\r', '\t']) {
        return Err(ServiceError::InvalidResponse(format!(
            "{field} contains a line break or tab: {trimmed:?}"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_phrases(phrases: Vec<String>, count: u32) -> Result<Vec<String>, ServiceError> {
    if phrases.len() > count as usize {
        return Err(ServiceError::InvalidResponse(format!(
            "expected at most {count} phrases, got {}",
            phrases.len()
        )));
    }
    phrases
        .into_iter()
        .map(|phrase| non_blank(phrase, "phrase"))
        .collect()
}
