//! Test builders — in-memory and delayed sources for batch harnesses.
//!
//! These are designed for readability in test assertions, not for production
//! use. They panic on invalid input rather than returning `Result`.

use futures::future::BoxFuture;
use std::io;
use std::time::Duration;
use xmljson_core::RawFile;

/// A source that waits before yielding its content (or its error).
///
/// Under `tokio::time::pause()` the delays only decide completion order.
pub struct DelayedFile {
    name: String,
    delay: Duration,
    content: Result<Vec<u8>, io::ErrorKind>,
}

impl DelayedFile {
    pub fn ok(name: &str, millis: u64, content: &str) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::from_millis(millis),
            content: Ok(content.as_bytes().to_vec()),
        }
    }

    pub fn failing(name: &str, millis: u64, kind: io::ErrorKind) -> Self {
        Self {
            name: name.to_string(),
            delay: Duration::from_millis(millis),
            content: Err(kind),
        }
    }
}

impl RawFile for DelayedFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> BoxFuture<'_, io::Result<Vec<u8>>> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            match &self.content {
                Ok(bytes) => Ok(bytes.clone()),
                Err(kind) => Err(io::Error::new(*kind, "simulated read failure")),
            }
        })
    }
}

/// Fluent builder for a batch of [`DelayedFile`]s.
///
/// ```rust
/// let files = BatchBuilder::new()
///     .file("a.xml", 30, "<a/>")
///     .unreadable("b.xml", 10)
///     .build();
/// ```
#[derive(Default)]
pub struct BatchBuilder {
    files: Vec<DelayedFile>,
}

impl BatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, millis: u64, content: &str) -> Self {
        self.files.push(DelayedFile::ok(name, millis, content));
        self
    }

    pub fn unreadable(mut self, name: &str, millis: u64) -> Self {
        self.files
            .push(DelayedFile::failing(name, millis, io::ErrorKind::PermissionDenied));
        self
    }

    pub fn build(self) -> Vec<DelayedFile> {
        self.files
    }
}
