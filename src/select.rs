//! Interactive multi-select over generated phrases.

use std::collections::BTreeSet;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::error::ServiceError;

/// Asks the user which candidates to keep. Suspends until the user answers.
pub trait Selector {
    /// Returns the chosen candidates in presentation order, each at most once.
    async fn select_from(
        &mut self,
        word: &str,
        candidates: &[String],
    ) -> Result<Vec<String>, ServiceError>;
}

/// Line-based prompt: numbered candidates, answered with e.g. `1,3`, `all`, or an empty line.
pub struct TerminalSelector<R, W> {
    input: R,
    output: W,
}

impl TerminalSelector<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> TerminalSelector<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    async fn write(&mut self, text: &str) -> Result<(), ServiceError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

impl<R, W> Selector for TerminalSelector<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn select_from(
        &mut self,
        word: &str,
        candidates: &[String],
    ) -> Result<Vec<String>, ServiceError> {
        let mut menu = format!("\nSelect phrases for \"{word}\":\n");
        for (i, candidate) in candidates.iter().enumerate() {
            menu.push_str(&format!("  {}) {candidate}\n", i + 1));
        }
        self.write(&menu).await?;

        loop {
            self.write("Numbers separated by commas, 'all', or Enter for none: ")
                .await?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                return Err(ServiceError::SelectionClosed);
            }

            match parse_selection(&line, candidates.len()) {
                Ok(indices) => {
                    return Ok(indices
                        .into_iter()
                        .map(|i| candidates[i].clone())
                        .collect());
                }
                Err(reason) => self.write(&format!("{reason}\n")).await?,
            }
        }
    }
}

/// Parses a 1-based selection into sorted, unique 0-based indices.
fn parse_selection(line: &str, len: usize) -> Result<Vec<usize>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }
    if line.eq_ignore_ascii_case("a") || line.eq_ignore_ascii_case("all") {
        return Ok((0..len).collect());
    }

    let mut chosen = BTreeSet::new();
    for token in line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let n: usize = token
            .parse()
            .map_err(|_| format!("'{token}' is not a number"))?;
        if n == 0 || n > len {
            return Err(format!("{n} is out of range (1-{len})"));
        }
        chosen.insert(n - 1);
    }
    Ok(chosen.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<String> {
        vec![
            "I run every day.".to_string(),
            "She runs a shop.".to_string(),
            "The river runs north.".to_string(),
        ]
    }

    #[test]
    fn parses_commas_and_spaces() {
        assert_eq!(parse_selection("1, 3", 3).unwrap(), vec![0, 2]);
        assert_eq!(parse_selection("3 1", 3).unwrap(), vec![0, 2]);
    }

    #[test]
    fn duplicates_collapse() {
        assert_eq!(parse_selection("2,2,2", 3).unwrap(), vec![1]);
    }

    #[test]
    fn empty_line_selects_nothing() {
        assert!(parse_selection("\n", 3).unwrap().is_empty());
    }

    #[test]
    fn all_selects_everything() {
        assert_eq!(parse_selection("ALL", 2).unwrap(), vec![0, 1]);
        assert_eq!(parse_selection("a", 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("two", 3).unwrap_err().contains("two"));
    }

    #[tokio::test]
    async fn returns_choices_in_presentation_order() {
        let mut output = Vec::new();
        let mut selector = TerminalSelector::new(&b"3,1\n"[..], &mut output);

        let chosen = selector.select_from("run", &candidates()).await.unwrap();

        assert_eq!(chosen, vec!["I run every day.", "The river runs north."]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("\"run\""));
        assert!(shown.contains("  2) She runs a shop."));
    }

    #[tokio::test]
    async fn reprompts_after_invalid_input() {
        let mut output = Vec::new();
        let mut selector = TerminalSelector::new(&b"9\n2\n"[..], &mut output);

        let chosen = selector.select_from("run", &candidates()).await.unwrap();

        assert_eq!(chosen, vec!["She runs a shop."]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("out of range"));
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let mut output = Vec::new();
        let mut selector = TerminalSelector::new(&b""[..], &mut output);

        let err = selector.select_from("run", &candidates()).await.unwrap_err();
        assert!(matches!(err, ServiceError::SelectionClosed));
    }
}
