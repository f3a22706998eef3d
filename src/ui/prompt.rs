//! Yes/no prompts

use crate::types::{Direction, SyncError};
use console::style;
use std::io::{self, BufRead, Write};

/// A decision the sync cycle needs from the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Print the list of unsynced files?
    ShowUnsynced,
    /// Copy the unsynced files in this direction?
    Copy(Direction),
    /// Scan both roots again after copying?
    Rescan,
}

impl Question {
    /// Prompt text shown to the user
    pub fn text(&self) -> String {
        match self {
            Question::ShowUnsynced => "Do you want to show the unsynced files?".to_string(),
            Question::Copy(direction) => format!(
                "Do you want to copy the unsynced files into the {}?",
                direction.target
            ),
            Question::Rescan => {
                "Do you want to rescan both folders to make sure they're synced?".to_string()
            }
        }
    }
}

/// Source of yes/no decisions
pub trait Prompter {
    fn confirm(&mut self, question: Question) -> Result<bool, SyncError>;
}

/// Line-oriented prompter over any reader/writer pair
///
/// `y` or `yes` (any case) is yes; anything else, including end of input, is no.
pub struct StdioPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl StdioPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for StdioPrompter<R, W> {
    fn confirm(&mut self, question: Question) -> Result<bool, SyncError> {
        write!(self.output, "{} [y/n]: ", style(question.text()).bold())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(parse_answer(&line))
    }
}

/// Answers yes to everything, but only to `rescans` rescan questions
#[derive(Debug, Clone)]
pub struct AssumeYes {
    rescans: usize,
}

impl AssumeYes {
    pub fn new(rescans: usize) -> Self {
        Self { rescans }
    }
}

impl Default for AssumeYes {
    /// One verification rescan after copying
    fn default() -> Self {
        Self::new(1)
    }
}

impl Prompter for AssumeYes {
    fn confirm(&mut self, question: Question) -> Result<bool, SyncError> {
        match question {
            Question::Rescan if self.rescans == 0 => Ok(false),
            Question::Rescan => {
                self.rescans -= 1;
                Ok(true)
            }
            _ => Ok(true),
        }
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
