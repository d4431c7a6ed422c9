//! Confirmation policies for the yes/no prompts asked while processing files.
//!
//! Every prompt goes through a [`Confirmer`], so the processing code never
//! touches the terminal directly. The raw answer is returned and interpreted
//! by the caller with [`parse_process_answer`] or [`is_affirmative`], since the
//! per-file prompt and the overwrite prompts accept different answers.

use crate::error::{QuartoHeaderError, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

pub trait Confirmer {
    /// Show `question` and return the raw answer with its line ending removed.
    fn ask(&mut self, question: &str) -> Result<String>;
}

impl<C: Confirmer + ?Sized> Confirmer for &mut C {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

impl<C: Confirmer + ?Sized> Confirmer for Box<C> {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }
}

/// Answers "yes" to everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoYes;

impl Confirmer for AutoYes {
    fn ask(&mut self, _question: &str) -> Result<String> {
        Ok("yes".to_string())
    }
}

/// Answers "no" to everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoNo;

impl Confirmer for AutoNo {
    fn ask(&mut self, _question: &str) -> Result<String> {
        Ok("no".to_string())
    }
}

/// Asks on the terminal with a dialoguer text input.
///
/// The input accepts an empty line so the per-file prompt can take its
/// default. Prompts and echo go to stderr.
pub struct ConsoleConfirmer {
    theme: ColorfulTheme,
}

impl ConsoleConfirmer {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// True when both ends of the prompt are attached to a terminal.
    pub fn is_available() -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }
}

impl Default for ConsoleConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for ConsoleConfirmer {
    fn ask(&mut self, question: &str) -> Result<String> {
        let (context, prompt) = split_question(question);
        if let Some(context) = context {
            eprintln!("{}", context);
        }

        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(dialoguer_error)
    }
}

/// Reads answers line by line from `reader`, writing each question to
/// `writer`. Used when answers are piped in.
pub struct LineConfirmer<R, W> {
    reader: R,
    writer: W,
}

impl LineConfirmer<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.writer.write_all(question.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(QuartoHeaderError::InputClosed);
        }

        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}

/// Replays a fixed list of answers and records every question asked.
#[derive(Debug, Default)]
pub struct ScriptedConfirmer {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedConfirmer {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Confirmer for ScriptedConfirmer {
    fn ask(&mut self, question: &str) -> Result<String> {
        self.asked.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| QuartoHeaderError::PromptExhausted {
                prompt: question.trim().to_string(),
            })
    }
}

/// Split a question into the lines shown above the input and the prompt
/// itself, without the trailing ": " the theme replaces.
fn split_question(question: &str) -> (Option<&str>, &str) {
    let question = question.trim_end();
    let (context, prompt) = match question.rsplit_once('\n') {
        Some((context, prompt)) => (Some(context), prompt),
        None => (None, question),
    };
    (context, prompt.trim_end_matches(':'))
}

fn dialoguer_error(error: dialoguer::Error) -> QuartoHeaderError {
    match error {
        dialoguer::Error::IO(e) => match e.kind() {
            io::ErrorKind::UnexpectedEof | io::ErrorKind::NotConnected => {
                QuartoHeaderError::InputClosed
            }
            _ => QuartoHeaderError::Io(e),
        },
    }
}

/// Interpret an answer to "Do you want to process the file ...?".
///
/// An empty answer takes the default (process). Anything outside
/// yes/y/no/n is an error.
pub fn parse_process_answer(answer: &str) -> Result<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" | "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        _ => Err(QuartoHeaderError::InvalidResponse {
            response: answer.to_string(),
        }),
    }
}

/// Interpret an answer to an overwrite prompt. Only yes/y overwrite.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_process_answers() {
        assert!(parse_process_answer("").unwrap());
        assert!(parse_process_answer("YES").unwrap());
        assert!(parse_process_answer("y").unwrap());
        assert!(!parse_process_answer("No").unwrap());
        assert!(!parse_process_answer("n").unwrap());

        let err = parse_process_answer("maybe").unwrap_err();
        assert!(matches!(err, QuartoHeaderError::InvalidResponse { response } if response == "maybe"));
    }

    #[test]
    fn test_overwrite_answers() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("Y"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yep"));
    }

    #[test]
    fn test_line_confirmer_reads_lines() {
        let input = Cursor::new("y\r\n\nno\n");
        let mut output = Vec::new();

        {
            let mut confirmer = LineConfirmer::new(input, &mut output);
            assert_eq!(confirmer.ask("first? ").unwrap(), "y");
            assert_eq!(confirmer.ask("second? ").unwrap(), "");
            assert_eq!(confirmer.ask("third? ").unwrap(), "no");
            assert!(matches!(
                confirmer.ask("fourth? "),
                Err(QuartoHeaderError::InputClosed)
            ));
        }

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown, "first? second? third? fourth? ");
    }

    #[test]
    fn test_split_question() {
        assert_eq!(
            split_question("Do you want to process the file a.qmd? (yes(default)/no): "),
            (None, "Do you want to process the file a.qmd? (yes(default)/no)")
        );
        assert_eq!(
            split_question("Existing header found:\n---\ntitle: x\n---\nOverwrite? (yes/no(default)): "),
            (
                Some("Existing header found:\n---\ntitle: x\n---"),
                "Overwrite? (yes/no(default))"
            )
        );
    }

    #[test]
    fn test_dialoguer_errors() {
        let eof = dialoguer::Error::IO(io::Error::new(io::ErrorKind::UnexpectedEof, "eof"));
        assert!(matches!(dialoguer_error(eof), QuartoHeaderError::InputClosed));

        let no_tty = dialoguer::Error::IO(io::Error::new(io::ErrorKind::NotConnected, "not a terminal"));
        assert!(matches!(dialoguer_error(no_tty), QuartoHeaderError::InputClosed));

        let denied = dialoguer::Error::IO(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(dialoguer_error(denied), QuartoHeaderError::Io(_)));
    }

    #[test]
    fn test_scripted_confirmer() {
        let mut confirmer = ScriptedConfirmer::new(["yes", "n"]);
        assert_eq!(confirmer.ask("a?").unwrap(), "yes");
        assert_eq!(confirmer.ask("b?").unwrap(), "n");
        assert!(matches!(
            confirmer.ask("c?"),
            Err(QuartoHeaderError::PromptExhausted { .. })
        ));
        assert_eq!(confirmer.asked(), ["a?", "b?", "c?"]);
    }

    #[test]
    fn test_auto_policies() {
        assert!(is_affirmative(&AutoYes.ask("overwrite?").unwrap()));
        assert!(!is_affirmative(&AutoNo.ask("overwrite?").unwrap()));
        assert!(!parse_process_answer(&AutoNo.ask("process?").unwrap()).unwrap());
    }
}
