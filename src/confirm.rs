//! Interactive yes/no confirmation before overwriting an existing subtitle file.
//!
//! The prompt is a small state machine driven one input line at a time:
//!
//! ```text
//! AwaitingInput --"y"--------------> Accepted
//! AwaitingInput --"n"--------------> Rejected
//! AwaitingInput --""---------------> Accepted | Rejected   (the default)
//! AwaitingInput --anything else----> Invalid --retry--> AwaitingInput
//! ```
//!
//! Non-interactive callers implement [`ConfirmOverwrite`] (any `FnMut(&Path) -> Result<bool>`
//! closure does) instead of going through the console.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::Result;

/// Shown before each read.
const PROMPT: &str = "  > ";

/// Shown after an unrecognized answer.
const RETRY_MESSAGE: &str = "    Please input either 'y' or 'n'";

/// State of a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingInput,
    Accepted,
    Rejected,
    Invalid,
}

impl ConfirmState {
    /// Classify one line of user input.
    ///
    /// Matching ignores case and surrounding whitespace. An empty answer takes `default`.
    pub fn on_input(line: &str, default: bool) -> Self {
        match line.trim().to_lowercase().as_str() {
            "y" => Self::Accepted,
            "n" => Self::Rejected,
            "" if default => Self::Accepted,
            "" => Self::Rejected,
            _ => Self::Invalid,
        }
    }

    /// The final answer, if this state is terminal.
    pub fn decision(self) -> Option<bool> {
        match self {
            Self::Accepted => Some(true),
            Self::Rejected => Some(false),
            Self::AwaitingInput | Self::Invalid => None,
        }
    }
}

/// Ask until the user gives a valid yes/no answer.
///
/// There is no retry limit. Reaching end of input counts as [`ConfirmState::Rejected`], so a
/// closed stdin never overwrites anything.
pub fn prompt_boolean_choice<R, W>(mut input: R, mut output: W, default: bool) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut state = ConfirmState::AwaitingInput;
    let mut line = String::new();

    loop {
        match state {
            ConfirmState::AwaitingInput => {
                write!(output, "{PROMPT}")?;
                output.flush()?;

                line.clear();
                state = if input.read_line(&mut line)? == 0 {
                    writeln!(output)?;
                    ConfirmState::Rejected
                } else {
                    ConfirmState::on_input(&line, default)
                };
            }
            ConfirmState::Invalid => {
                writeln!(output, "{RETRY_MESSAGE}")?;
                state = ConfirmState::AwaitingInput;
            }
            ConfirmState::Accepted | ConfirmState::Rejected => {
                tracing::debug!(?state, "confirmation answered");
                return Ok(state == ConfirmState::Accepted);
            }
        }
    }
}

/// Decides whether an existing output file may be overwritten.
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool>;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&Path) -> Result<bool>,
{
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        self(path)
    }
}

/// Asks on a console-like reader/writer pair. The default answer is "no".
pub struct ConsolePrompt<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for ConsolePrompt<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        let shown = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        writeln!(
            self.output,
            "The output path already exists: {}",
            shown.display()
        )?;
        writeln!(self.output, "Do you want to overwrite it? (y/N)")?;

        prompt_boolean_choice(&mut self.input, &mut self.output, false)
    }
}
