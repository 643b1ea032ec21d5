use tracing::{debug, info};

use super::{PendingTranslation, WordRequest};
use crate::config::Config;
use crate::error::ServiceError;
use crate::select::Selector;
use crate::tutor::LanguageService;

fn requests(config: &Config) -> impl Iterator<Item = WordRequest<'_>> {
    config.words.iter().map(|word| WordRequest {
        word,
        num_phrases: config.num_phrases,
    })
}

/// Runs meaning → phrases → selection for every word, strictly in input order,
/// and returns the accumulated selections.
pub async fn process_words(
    config: &Config,
    service: &impl LanguageService,
    selector: &mut impl Selector,
) -> Result<Vec<PendingTranslation>, ServiceError> {
    let mut pending = Vec::new();

    for request in requests(config) {
        let selected = process_word(request, service, selector, &mut pending).await?;
        info!(word = request.word, selected, "word processed");
    }

    Ok(pending)
}

async fn process_word(
    request: WordRequest<'_>,
    service: &impl LanguageService,
    selector: &mut impl Selector,
    pending: &mut Vec<PendingTranslation>,
) -> Result<usize, ServiceError> {
    let meaning = service.meaning_of(request.word).await?;
    let candidates = service
        .generate_phrases(request.word, request.num_phrases)
        .await?;

    println!("\n{}: {meaning}", request.word);

    if candidates.is_empty() {
        debug!(word = request.word, "no candidates generated, skipping selection");
        return Ok(0);
    }

    let chosen = selector.select_from(request.word, &candidates).await?;
    let count = chosen.len();
    pending.extend(chosen.into_iter().map(|phrase| PendingTranslation {
        word: request.word.to_string(),
        meaning: meaning.clone(),
        phrase,
    }));
    Ok(count)
}
