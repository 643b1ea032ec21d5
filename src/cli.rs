use clap::Parser;

/// Build bilingual English/Portuguese flashcards from generated example phrases.
///
/// Provider selection and credentials come from the environment:
/// - `PHRASECARDS_PROVIDER`: `gemini` (default) or `openai`
/// - `GEMINI_API_KEY` / `OPENAI_API_KEY`: credential for the selected provider
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Comma-separated list of words to study (e.g. "run,jump")
    #[arg(short, long)]
    pub words: String,

    /// Number of candidate phrases to generate per word
    #[arg(
        short = 'n',
        long = "numPhrases",
        alias = "num-phrases",
        default_value = "5",
        allow_hyphen_values = true
    )]
    pub num_phrases: String,

    /// Write the selected phrases to flashcards.txt
    #[arg(short, long)]
    pub flashcards: bool,
}
