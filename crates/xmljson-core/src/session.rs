//! Session — the embedding layer's view of the converter.
//!
//! A [`Session`] owns the output property, the current file selection, the
//! visibility flag, and the reset token. It is a plain state machine: the
//! caller runs batches itself and reports completions back with the
//! [`BatchTicket`] it was handed when the batch started.
//!
//! # Late results
//!
//! Every selection and every reset advances the session generation. A
//! completion carrying a ticket from an older generation is dropped, so a
//! batch that finishes after a reset (or after a newer selection) can never
//! overwrite the current state.

use crate::config::Config;
use crate::output::BatchOutput;
use thiserror::Error;

/// Instructional text placed before the output by [`CopyAction::WithPrompt`].
pub const SCHEMA_PROMPT: &str = "\
The JSON below was generated from one or more XML documents. Each entry has a
`fileName` and either a `content` object or an `error` message. Inside
`content`, XML attributes are grouped under \"@attributes\", text that sits next
to child elements is stored under \"#text\", and a tag that repeats among its
siblings becomes an array. Treat this structure as the schema of the data:
describe each field, infer its type, and note which fields are optional or
repeated.

";

/// Identifies one started batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTicket(u64);

/// What to place on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyAction {
    /// The output, verbatim.
    Schema,
    /// [`SCHEMA_PROMPT`] followed by the output.
    WithPrompt,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no files selected")]
    Empty,
    #[error("only one file may be selected at a time ({0} given)")]
    MultipleNotAllowed(usize),
}

#[derive(Debug, Clone)]
pub struct Session {
    output: Option<String>,
    selected: Vec<String>,
    reset_token: Option<u64>,
    generation: u64,
    allow_multiple: bool,
    show_results: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl Session {
    pub fn new(allow_multiple: bool, show_results: bool) -> Self {
        Self {
            output: None,
            selected: Vec::new(),
            reset_token: None,
            generation: 0,
            allow_multiple,
            show_results,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.input.allow_multiple, config.ui.show_results)
    }

    /// Record a new file selection and hand out the ticket for its batch.
    ///
    /// The previous output stays visible until the new batch completes.
    pub fn select(&mut self, names: Vec<String>) -> Result<BatchTicket, SelectionError> {
        match names.len() {
            0 => return Err(SelectionError::Empty),
            n if n > 1 && !self.allow_multiple => {
                return Err(SelectionError::MultipleNotAllowed(n))
            }
            _ => {}
        }
        self.generation += 1;
        self.selected = names;
        tracing::debug!(generation = self.generation, files = self.selected.len(), "selection");
        Ok(BatchTicket(self.generation))
    }

    /// Store a finished batch's output. Returns `false` (and changes nothing)
    /// when the ticket has been superseded.
    pub fn complete(&mut self, ticket: BatchTicket, output: &BatchOutput) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                generation = self.generation,
                "dropping superseded batch output"
            );
            return false;
        }
        self.output = Some(output.to_json());
        true
    }

    /// Apply an externally driven reset token. Any change of value, including
    /// from `None` to `Some`, discards the output and the selection and
    /// invalidates in-flight batches. Returns whether a reset happened.
    pub fn apply_reset_token(&mut self, token: Option<u64>) -> bool {
        if token == self.reset_token {
            return false;
        }
        self.reset_token = token;
        self.generation += 1;
        self.output = None;
        self.selected.clear();
        tracing::debug!(?token, generation = self.generation, "session reset");
        true
    }

    /// Reset by advancing the session's own token.
    pub fn reset(&mut self) {
        let next = self.reset_token.map_or(0, |t| t.wrapping_add(1));
        self.apply_reset_token(Some(next));
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn reset_token(&self) -> Option<u64> {
        self.reset_token
    }

    pub fn allow_multiple(&self) -> bool {
        self.allow_multiple
    }

    pub fn show_results(&self) -> bool {
        self.show_results
    }

    pub fn set_show_results(&mut self, show: bool) {
        self.show_results = show;
    }

    /// Text for a copy action, or `None` when there is no output to copy.
    pub fn copy_text(&self, action: CopyAction) -> Option<String> {
        let output = self.output.as_deref()?;
        Some(match action {
            CopyAction::Schema => output.to_string(),
            CopyAction::WithPrompt => format!("{SCHEMA_PROMPT}{output}"),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
