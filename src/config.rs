use std::path::PathBuf;

use crate::cli::Args;

/// Export target, relative to the working directory.
pub const FLASHCARDS_FILE: &str = "flashcards.txt";

const PROVIDER_VAR: &str = "PHRASECARDS_PROVIDER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no words given: pass a comma-separated list with -w/--words")]
    EmptyWordList,

    #[error("invalid phrase count {0:?}: expected a positive integer")]
    InvalidPhraseCount(String),

    #[error("unknown provider {0:?} in PHRASECARDS_PROVIDER (expected \"gemini\" or \"openai\")")]
    UnknownProvider(String),

    #[error("{var} not set. {hint}")]
    MissingCredential {
        var: &'static str,
        hint: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    fn key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }

    fn key_hint(self) -> &'static str {
        match self {
            Self::Gemini => "Get one at https://aistudio.google.com/apikey",
            Self::OpenAi => "Get one at https://platform.openai.com/api-keys",
        }
    }

    fn model_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_MODEL",
            Self::OpenAi => "OPENAI_MODEL",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::OpenAi => "gpt-4o-mini",
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: ApiKey,
    pub model: String,
    /// Only honoured for OpenAI-compatible servers (`OPENAI_BASE_URL`).
    pub base_url: Option<String>,
}

/// Validated run configuration, built once at startup and handed to every stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub words: Vec<String>,
    pub num_phrases: u32,
    pub flashcards: bool,
    pub output: PathBuf,
    pub provider: ProviderConfig,
}

impl Config {
    /// Checks the CLI input and provider environment, in that order.
    /// `lookup` resolves environment variables.
    pub fn validate(
        args: &Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let words = parse_words(&args.words)?;
        let num_phrases = parse_phrase_count(&args.num_phrases)?;
        let provider = provider_from(&lookup)?;

        Ok(Self {
            words,
            num_phrases,
            flashcards: args.flashcards,
            output: PathBuf::from(FLASHCARDS_FILE),
            provider,
        })
    }
}

fn parse_words(raw: &str) -> Result<Vec<String>, ConfigError> {
    let words: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return Err(ConfigError::EmptyWordList);
    }
    Ok(words)
}

fn parse_phrase_count(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidPhraseCount(raw.to_string())),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn provider_from(lookup: &impl Fn(&str) -> Option<String>) -> Result<ProviderConfig, ConfigError> {
    let kind = ProviderKind::parse(&lookup(PROVIDER_VAR).unwrap_or_default())?;

    let api_key = non_blank(lookup(kind.key_var())).ok_or(ConfigError::MissingCredential {
        var: kind.key_var(),
        hint: kind.key_hint(),
    })?;
    let model = non_blank(lookup(kind.model_var()))
        .unwrap_or_else(|| kind.default_model().to_string());
    let base_url = match kind {
        ProviderKind::OpenAi => non_blank(lookup("OPENAI_BASE_URL")),
        ProviderKind::Gemini => None,
    };

    Ok(ProviderConfig {
        kind,
        api_key: ApiKey(api_key),
        model,
        base_url,
    })
}

#[cfg(test)]
pub(crate) fn test_config(words: &[&str], num_phrases: u32, output: PathBuf) -> Config {
    Config {
        words: words.iter().map(|w| w.to_string()).collect(),
        num_phrases,
        flashcards: true,
        output,
        provider: ProviderConfig {
            kind: ProviderKind::Gemini,
            api_key: ApiKey("test-key".to_string()),
            model: ProviderKind::Gemini.default_model().to_string(),
            base_url: None,
        },
    }
}
