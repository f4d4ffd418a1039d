//! Headless mode — convert once, print the output JSON, exit.
//!
//! The output goes to stdout untouched so it can be piped. Diagnostics and
//! the OSC 52 clipboard fallback go to stderr.

use std::io::Write;
use xmljson_core::{config::Config, convert_batch, BatchOutput, CopyAction, Session};
use xmljson_tui::clipboard::Clipboard;

/// The batch completed; some files may still carry per-file errors.
pub const EXIT_OK: i32 = 0;
/// The selection was rejected before any file was read.
pub const EXIT_REJECTED: i32 = 1;
/// The batch as a whole faulted.
pub const EXIT_FAULT: i32 = 2;

/// Convert `files`, write the output to `out`, and optionally copy it.
/// Returns the process exit code.
pub fn run(
    config: &Config,
    files: Vec<String>,
    copy: Option<CopyAction>,
    clipboard: &mut Clipboard,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<i32> {
    let mut session = Session::from_config(config);
    let ticket = match session.select(files.clone()) {
        Ok(ticket) => ticket,
        Err(e) => {
            tracing::warn!(error = %e, "selection rejected");
            writeln!(err, "xmljson: {e}")?;
            return Ok(EXIT_REJECTED);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("xmljson-batch")
        .build()?;
    let options = config.convert.options();
    let output = runtime.block_on(async {
        let sources = xmljson_sources::from_args(&files);
        BatchOutput::from(convert_batch(sources, options).await)
    });
    session.complete(ticket, &output);

    if let Some(json) = session.output() {
        writeln!(out, "{json}")?;
        out.flush()?;
    }

    if let Some(action) = copy {
        copy_output(&session, action, clipboard, err)?;
    }

    let code = if output.is_fault() { EXIT_FAULT } else { EXIT_OK };
    tracing::info!(code, failed = output.failed_files(), "headless run finished");
    Ok(code)
}

fn copy_output(
    session: &Session,
    action: CopyAction,
    clipboard: &mut Clipboard,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    if !session.show_results() {
        writeln!(err, "xmljson: results are hidden (ui.show_results = false); not copying")?;
        return Ok(());
    }
    let Some(text) = session.copy_text(action) else {
        return Ok(());
    };
    match clipboard.copy(&text) {
        Ok(target) => writeln!(err, "xmljson: copied to {target}")?,
        Err(e) => {
            tracing::error!(error = %e, "copy failed");
            writeln!(err, "xmljson: copy failed: {e}")?;
        }
    }
    Ok(())
}
