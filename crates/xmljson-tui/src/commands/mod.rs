// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Select files and start a batch; `-` is stdin
    Load(Vec<String>),
    // Discard output and selection
    Reset,
    // Copy output verbatim
    Copy,
    // Copy prompt + output
    CopyPrompt,
    // Toggle result panel visibility
    Results,
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "reset" => Ok(Command::Reset),
            "copy" | "y" => Ok(Command::Copy),
            "copy-prompt" | "Y" => Ok(Command::CopyPrompt),
            "results" => Ok(Command::Results),
            "load" | "e" | "open" => {
                let paths: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
                if paths.is_empty() {
                    Err("usage: load <path>...".to_string())
                } else {
                    Ok(Command::Load(paths))
                }
            }
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}
