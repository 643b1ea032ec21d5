//! Flashcard pipeline: sequential per-word selection, concurrent translation, export.

pub(crate) mod export;
pub(crate) mod summary;
pub(crate) mod translate;
pub(crate) mod words;

use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::select::Selector;
use crate::tutor::LanguageService;

#[derive(Debug, Clone, Copy)]
pub struct WordRequest<'a> {
    pub word: &'a str,
    pub num_phrases: u32,
}

/// A selected phrase waiting to be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTranslation {
    pub word: String,
    pub meaning: String,
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationPair {
    pub word: String,
    pub meaning: String,
    pub english: String,
    pub portuguese: String,
}

/// Runs both stages, prints the summary and writes the export when enabled.
pub async fn run(
    config: &Config,
    service: &impl LanguageService,
    selector: &mut impl Selector,
) -> Result<Vec<TranslationPair>, AppError> {
    let pending = words::process_words(config, service, selector).await?;
    info!(pending = pending.len(), "selection finished, translating");

    let pairs = translate::translate_all(service, pending).await?;
    println!("\n{}", summary::format_summary(&pairs));

    if config.flashcards {
        export::write_flashcards(&config.output, &pairs).await?;
        println!("\nFlashcards saved to {}", config.output.display());
    }

    Ok(pairs)
}
