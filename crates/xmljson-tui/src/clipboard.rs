//! Clipboard — system clipboard with a terminal (OSC 52) fallback.
//!
//! [`Clipboard::copy`] tries the primary sink first and only reaches for the
//! fallback when the primary reports an error. The OSC 52 sink asks the
//! terminal emulator to set the clipboard, which works over SSH and on
//! headless machines where no display server is reachable.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard error: {0}")]
    Clip(String),
    #[error("terminal write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("{primary}; fallback also failed: {fallback}")]
    Exhausted { primary: String, fallback: String },
}

/// Something that can receive clipboard text.
pub trait ClipboardSink {
    /// Short name used in status messages.
    fn label(&self) -> &'static str;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard via `copypasta`.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn label(&self) -> &'static str {
        "system clipboard"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        use copypasta::{ClipboardContext, ClipboardProvider};
        let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Clip(e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::Clip(e.to_string()))
    }
}

/// Terminal clipboard via the OSC 52 escape sequence.
pub struct Osc52<W: Write> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// The escape sequence that asks the terminal to put `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", B64.encode(text))
}

impl<W: Write> ClipboardSink for Osc52<W> {
    fn label(&self) -> &'static str {
        "terminal clipboard"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Primary sink plus fallback.
pub struct Clipboard {
    primary: Box<dyn ClipboardSink>,
    fallback: Box<dyn ClipboardSink>,
}

impl Clipboard {
    pub fn new(primary: Box<dyn ClipboardSink>, fallback: Box<dyn ClipboardSink>) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard, falling back to OSC 52 written to `terminal`.
    pub fn system_with_terminal_fallback<W: Write + 'static>(terminal: W) -> Self {
        Self::new(Box::new(SystemClipboard), Box::new(Osc52::new(terminal)))
    }

    /// Copy `text`, returning the label of the sink that accepted it.
    pub fn copy(&mut self, text: &str) -> Result<&'static str, ClipboardError> {
        match self.primary.set_text(text) {
            Ok(()) => Ok(self.primary.label()),
            Err(primary) => {
                tracing::warn!(error = %primary, "primary clipboard failed, using fallback");
                match self.fallback.set_text(text) {
                    Ok(()) => Ok(self.fallback.label()),
                    Err(fallback) => Err(ClipboardError::Exhausted {
                        primary: primary.to_string(),
                        fallback: fallback.to_string(),
                    }),
                }
            }
        }
    }
}
