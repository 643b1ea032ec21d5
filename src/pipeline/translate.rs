use futures::future::try_join_all;
use tracing::info;

use super::{PendingTranslation, TranslationPair};
use crate::error::ServiceError;
use crate::tutor::LanguageService;

/// Translates every pending phrase concurrently on the current task.
///
/// Results keep submission order regardless of completion order. The first
/// failure aborts the whole batch and no partial results are returned.
pub async fn translate_all(
    service: &impl LanguageService,
    pending: Vec<PendingTranslation>,
) -> Result<Vec<TranslationPair>, ServiceError> {
    let total = pending.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let requests = pending.into_iter().map(|item| async move {
        let portuguese = service.translate(&item.phrase).await?;
        Ok::<_, ServiceError>(TranslationPair {
            word: item.word,
            meaning: item.meaning,
            english: item.phrase,
            portuguese,
        })
    });

    let pairs = try_join_all(requests).await?;
    info!(total, "translations complete");
    Ok(pairs)
}
