use clap::Parser;
use std::io;
use xmljson::headless;
use xmljson_core::{config::Config, CopyAction};
use xmljson_tui::clipboard::Clipboard;

#[derive(Parser)]
#[command(name = "xmljson", about = "Convert XML documents into normalized JSON")]
struct Cli {
    /// XML files to convert, in order. `-` reads standard input.
    files: Vec<String>,

    /// Convert FILES, print the output JSON to stdout, and exit.
    #[arg(long)]
    headless: bool,

    /// (headless) Copy the output to the clipboard.
    #[arg(long, requires = "headless", conflicts_with = "copy_with_prompt")]
    copy: bool,

    /// (headless) Copy the instructional prompt followed by the output.
    #[arg(long, requires = "headless")]
    copy_with_prompt: bool,

    /// Write debug logs to /tmp/xmljson-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/xmljson-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("xmljson debug log started, tail -f /tmp/xmljson-debug.log");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::defaults()
    });

    if !cli.headless {
        return xmljson_tui::run(config, cli.files);
    }

    let copy = match (cli.copy, cli.copy_with_prompt) {
        (true, _) => Some(CopyAction::Schema),
        (_, true) => Some(CopyAction::WithPrompt),
        _ => None,
    };
    let mut clipboard = Clipboard::system_with_terminal_fallback(io::stderr());
    let code = headless::run(
        &config,
        cli.files,
        copy,
        &mut clipboard,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )?;
    std::process::exit(code);
}
