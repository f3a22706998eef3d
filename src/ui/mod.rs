//! Terminal interaction: progress output and prompts

mod progress;
mod prompt;

pub use progress::{format_failure, ProgressReporter};
pub use prompt::{AssumeYes, Prompter, Question, StdioPrompter};
