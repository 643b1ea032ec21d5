use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::TranslationPair;
use crate::error::AppError;

/// Anki import directives.
const HEADER: [&str; 3] = ["#separator:tab", "#html:true", "#tags column:3"];

fn format_line(pair: &TranslationPair) -> String {
    format!(
        "\"{} <b><span style=\"color: rgb(0, 0, 255);\">{}</span></b>\"\t{}",
        pair.english, pair.word, pair.meaning
    )
}

/// Header lines followed by one card per pair, newline-joined without a trailing newline.
pub fn format_flashcards(pairs: &[TranslationPair]) -> String {
    HEADER
        .iter()
        .map(|line| line.to_string())
        .chain(pairs.iter().map(format_line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Best-effort removal of a partially written temp file.
async fn discard_temp(tmp: &Path) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %tmp.display(), error = %e, "failed to remove temp file"),
    }
}

/// Writes the flashcard file in one step: content goes to a sibling temp file
/// which is then renamed over `path`.
pub async fn write_flashcards(path: &Path, pairs: &[TranslationPair]) -> Result<(), AppError> {
    let content = format_flashcards(pairs);
    let tmp = temp_path(path);
    let to_error = |source| AppError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = tokio::fs::write(&tmp, content.as_bytes()).await {
        discard_temp(&tmp).await;
        return Err(to_error(e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        discard_temp(&tmp).await;
        return Err(to_error(e));
    }

    info!(path = %path.display(), cards = pairs.len(), "flashcards written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(word: &str, english: &str, meaning: &str) -> TranslationPair {
        TranslationPair {
            word: word.to_string(),
            meaning: meaning.to_string(),
            english: english.to_string(),
            portuguese: "irrelevant".to_string(),
        }
    }

    #[test]
    fn formats_header_and_cards() {
        let content = format_flashcards(&[
            pair("run", "I run every day.", "to move fast on foot"),
            pair("jump", "Cats jump high.", "to push off the ground"),
        ]);

        let lines: Vec<_> = content.split('\n').collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(&lines[..3], &HEADER[..]);
        assert_eq!(
            lines[3],
            "\"I run every day. <b><span style=\"color: rgb(0, 0, 255);\">run</span></b>\"\tto move fast on foot"
        );
        assert_eq!(lines[4].split('\t').nth(1), Some("to push off the ground"));
        assert!(!content.ends_with('\n'));
    }

    #[test]
    fn no_pairs_yields_header_only() {
        assert_eq!(
            format_flashcards(&[]),
            "#separator:tab\n#html:true\n#tags column:3"
        );
    }

    #[tokio::test]
    async fn writes_file_and_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.txt");

        write_flashcards(&path, &[pair("run", "I run.", "to move")])
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 4);
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.txt");
        std::fs::write(&path, "old content").unwrap();

        write_flashcards(&path, &[]).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 3);
    }

    #[tokio::test]
    async fn missing_directory_is_file_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("flashcards.txt");

        let err = write_flashcards(&path, &[]).await.unwrap_err();

        match err {
            AppError::FileWrite { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected FileWrite, got: {other:?}"),
        }
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn discard_temp_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = temp_path(&dir.path().join("flashcards.txt"));
        std::fs::write(&tmp, "#separator:tab\n#html").unwrap();

        discard_temp(&tmp).await;

        assert!(!tmp.exists());
    }

    #[tokio::test]
    async fn discard_temp_ignores_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = temp_path(&dir.path().join("flashcards.txt"));

        discard_temp(&tmp).await;

        assert!(!tmp.exists());
    }
}
