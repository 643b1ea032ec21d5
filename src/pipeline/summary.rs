use super::TranslationPair;

pub fn format_summary(pairs: &[TranslationPair]) -> String {
    if pairs.is_empty() {
        return "No phrases selected.".to_string();
    }
    pairs
        .iter()
        .map(|pair| {
            format!(
                "Meaning: {}\nEnglish: {}\nPortuguese: {}",
                pair.meaning, pair.english, pair.portuguese
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let pairs = vec![
            TranslationPair {
                word: "run".into(),
                meaning: "to move fast".into(),
                english: "I run.".into(),
                portuguese: "Eu corro.".into(),
            },
            TranslationPair {
                word: "jump".into(),
                meaning: "to leap".into(),
                english: "We jump.".into(),
                portuguese: "Nós pulamos.".into(),
            },
        ];

        let text = format_summary(&pairs);

        assert_eq!(
            text,
            "Meaning: to move fast\nEnglish: I run.\nPortuguese: Eu corro.\n\n\
             Meaning: to leap\nEnglish: We jump.\nPortuguese: Nós pulamos."
        );
    }

    #[test]
    fn empty_summary_says_so() {
        assert_eq!(format_summary(&[]), "No phrases selected.");
    }
}
