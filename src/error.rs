use std::path::PathBuf;

use crate::config::ConfigError;

/// Failure of any collaborator the pipeline talks to: the generation
/// backend (meaning, phrases, translation) or the selection prompt.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("invalid response from model: {0}")]
    InvalidResponse(String),

    #[error("failed to read selection: {0}")]
    Input(#[from] std::io::Error),

    #[error("input closed before a selection was made")]
    SelectionClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
