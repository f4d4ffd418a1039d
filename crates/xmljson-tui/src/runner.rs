//! Batch runner — drives conversions on a background tokio runtime and hands
//! finished batches back to the synchronous event loop.
//!
//! The UI thread never blocks on a batch: [`BatchRunner::start`] returns
//! immediately and [`BatchRunner::poll`] is called once per frame.

use std::sync::mpsc;
use xmljson_core::session::BatchTicket;
use xmljson_core::{convert_batch, BatchOutput, ConvertOptions};

/// A batch that has finished, tagged with the ticket it was started under.
#[derive(Debug)]
pub struct Completion {
    pub ticket: BatchTicket,
    pub output: BatchOutput,
}

pub struct BatchRunner {
    runtime: tokio::runtime::Runtime,
    options: ConvertOptions,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl BatchRunner {
    pub fn new(options: ConvertOptions) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("xmljson-batch")
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok(Self { runtime, options, tx, rx })
    }

    /// Start converting the given command-line arguments (paths or `-`).
    pub fn start(&self, ticket: BatchTicket, args: Vec<String>) {
        let tx = self.tx.clone();
        let options = self.options;
        self.runtime.spawn(async move {
            let files = xmljson_sources::from_args(&args);
            let output = BatchOutput::from(convert_batch(files, options).await);
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(Completion { ticket, output });
        });
    }

    /// Return the next finished batch, if any, without blocking.
    pub fn poll(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }
}
