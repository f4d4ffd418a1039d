//! Batch converter — fan out one read → parse → normalize pipeline per file,
//! then gather every result back into input order.
//!
//! Per-file failures (unreadable file, malformed XML, excessive nesting) are
//! turned into [`ConversionResult`] errors inside their own pipeline and never
//! reach siblings. Only a fault in the gather step itself (a pipeline task that
//! panicked or was cancelled) escapes, as a [`BatchFault`].

use crate::normalizer::normalize;
use crate::types::{BatchResult, ConversionResult};
use crate::xml::{decode, parse_document, ParseError, ParseOptions};
use futures::future::BoxFuture;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};

/// Error text for a document that is not well-formed.
pub const INVALID_XML: &str = "Invalid XML";
/// Prefix of the error text for a file that could not be read.
pub const READ_FAILED: &str = "Failed to read file";

// ---------------------------------------------------------------------------
// Input boundary
// ---------------------------------------------------------------------------

/// A named file whose content is read asynchronously.
///
/// Implemented by the sources crate for paths on disk, standard input, and
/// in-memory buffers.
pub trait RawFile: Send + Sync + 'static {
    /// Display name reported as `fileName` in the result.
    fn name(&self) -> &str;

    /// Read the full content.
    fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>>;
}

impl<T: RawFile + ?Sized> RawFile for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        (**self).read()
    }
}

/// Options applied to every file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    pub parse: ParseOptions,
    /// Append the parser's own message to [`INVALID_XML`].
    pub parser_detail: bool,
}

/// The gather step failed outside any single file's error handling.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{detail}")]
pub struct BatchFault {
    pub detail: String,
}

impl From<JoinError> for BatchFault {
    fn from(err: JoinError) -> Self {
        let fallback = err.to_string();
        if !err.is_panic() {
            return Self { detail: fallback };
        }
        let payload = err.into_panic();
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or(fallback);
        Self { detail }
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert one file's raw bytes. Never fails: every problem becomes an error
/// result.
pub fn convert_bytes(file_name: &str, bytes: &[u8], options: ConvertOptions) -> ConversionResult {
    let text = decode(bytes);
    match parse_document(&text, options.parse) {
        Ok(root) => ConversionResult::content(file_name, normalize(&root)),
        Err(ParseError::Malformed(detail)) => {
            tracing::warn!(file = file_name, %detail, "invalid XML");
            let message = if options.parser_detail {
                format!("{INVALID_XML}: {detail}")
            } else {
                INVALID_XML.to_string()
            };
            ConversionResult::error(file_name, message)
        }
        Err(err @ ParseError::TooDeep(_)) => {
            tracing::warn!(file = file_name, error = %err, "document rejected");
            ConversionResult::error(file_name, err.to_string())
        }
    }
}

/// Read and convert a single file.
pub async fn convert_file<F: RawFile>(file: &F, options: ConvertOptions) -> ConversionResult {
    let name = file.name();
    match file.read().await {
        Ok(bytes) => {
            tracing::debug!(file = name, bytes = bytes.len(), "file read");
            convert_bytes(name, &bytes, options)
        }
        Err(err) => {
            tracing::warn!(file = name, error = %err, "file read failed");
            ConversionResult::error(name, format!("{READ_FAILED}: {err}"))
        }
    }
}

/// Convert every file concurrently and return the results in input order.
///
/// Must be called from within a tokio runtime; each file runs on its own task.
pub async fn convert_batch<I, F>(files: I, options: ConvertOptions) -> Result<BatchResult, BatchFault>
where
    I: IntoIterator<Item = F>,
    F: RawFile,
{
    let mut set = JoinSet::new();
    let mut total = 0usize;
    for (index, file) in files.into_iter().enumerate() {
        total += 1;
        set.spawn(async move { (index, convert_file(&file, options).await) });
    }
    tracing::debug!(files = total, "batch started");

    let mut slots: Vec<Option<ConversionResult>> = vec![None; total];
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, result)) => {
                tracing::debug!(index, file = %result.file_name, failed = result.is_error(), "file finished");
                slots[index] = Some(result);
            }
            Err(err) => {
                let fault = BatchFault::from(err);
                tracing::error!(detail = %fault.detail, "batch gather failed");
                set.abort_all();
                return Err(fault);
            }
        }
    }

    let results: Option<BatchResult> = slots.into_iter().collect();
    let results = results.ok_or_else(|| BatchFault {
        detail: "a file finished without producing a result".to_string(),
    })?;
    tracing::debug!(
        files = results.len(),
        failed = results.iter().filter(|r| r.is_error()).count(),
        "batch finished"
    );
    Ok(results)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::time::Duration;

    enum Behaviour {
        Content(&'static str),
        Fail,
        Panic,
    }

    struct TestFile {
        name: &'static str,
        delay: Duration,
        behaviour: Behaviour,
    }

    impl TestFile {
        fn ok(name: &'static str, xml: &'static str) -> Self {
            Self {
                name,
                delay: Duration::ZERO,
                behaviour: Behaviour::Content(xml),
            }
        }

        fn delayed(mut self, ms: u64) -> Self {
            self.delay = Duration::from_millis(ms);
            self
        }
    }

    impl RawFile for TestFile {
        fn name(&self) -> &str {
            self.name
        }

        fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                match self.behaviour {
                    Behaviour::Content(xml) => Ok(xml.as_bytes().to_vec()),
                    Behaviour::Fail => Err(std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "permission denied",
                    )),
                    Behaviour::Panic => panic!("reader exploded"),
                }
            })
        }
    }

    #[test]
    fn convert_bytes_scenarios() {
        let opts = ConvertOptions::default();
        assert_eq!(
            convert_bytes("a.xml", br#"<a x="1"><b>hi</b><b>bye</b></a>"#, opts),
            ConversionResult::content("a.xml", json!({"@attributes": {"x": "1"}, "b": ["hi", "bye"]}))
        );
        assert_eq!(
            convert_bytes("a.xml", b"<a></a>", opts),
            ConversionResult::content("a.xml", json!({}))
        );
        assert_eq!(
            convert_bytes("f.xml", b"", opts),
            ConversionResult::error("f.xml", "Invalid XML")
        );
    }

    #[test]
    fn parser_detail_is_appended_when_enabled() {
        let opts = ConvertOptions {
            parser_detail: true,
            ..ConvertOptions::default()
        };
        let result = convert_bytes("f.xml", b"<a>", opts);
        let message = result.error_message().unwrap();
        assert!(message.starts_with("Invalid XML: "), "got {message:?}");
    }

    #[test]
    fn nesting_limit_reported_per_file() {
        let opts = ConvertOptions {
            parse: ParseOptions {
                max_depth: 2,
                ..ParseOptions::default()
            },
            ..ConvertOptions::default()
        };
        assert_eq!(
            convert_bytes("deep.xml", b"<a><b><c/></b></a>", opts),
            ConversionResult::error("deep.xml", "XML nesting exceeds 2 levels")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn results_follow_input_order_not_completion_order() {
        let files = vec![
            TestFile::ok("1.xml", "<r>one</r>").delayed(30),
            TestFile::ok("2.xml", "<r>two</r>").delayed(20),
            TestFile::ok("3.xml", "<r>three</r>").delayed(10),
        ];
        let results = convert_batch(files, ConvertOptions::default()).await.unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, ["1.xml", "2.xml", "3.xml"]);
        assert_eq!(results[2].content_value(), Some(&json!("three")));
    }

    #[tokio::test]
    async fn malformed_file_does_not_affect_siblings() {
        let files = vec![
            TestFile::ok("1.xml", "<a>1</a>"),
            TestFile::ok("2.xml", "<a>"),
            TestFile::ok("3.xml", "<a>3</a>"),
        ];
        let results = convert_batch(files, ConvertOptions::default()).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].content_value(), Some(&json!("1")));
        assert_eq!(results[1].error_message(), Some("Invalid XML"));
        assert_eq!(results[2].content_value(), Some(&json!("3")));
    }

    #[tokio::test]
    async fn read_failure_becomes_error_result() {
        let files = vec![
            TestFile {
                name: "locked.xml",
                delay: Duration::ZERO,
                behaviour: Behaviour::Fail,
            },
            TestFile::ok("ok.xml", "<a/>"),
        ];
        let results = convert_batch(files, ConvertOptions::default()).await.unwrap();
        assert_eq!(
            results[0].error_message(),
            Some("Failed to read file: permission denied")
        );
        assert_eq!(results[1].content_value(), Some(&json!({})));
    }

    #[tokio::test]
    async fn empty_batch_is_empty_result() {
        let results = convert_batch(Vec::<TestFile>::new(), ConvertOptions::default())
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn panicking_pipeline_becomes_batch_fault() {
        let files = vec![
            TestFile::ok("ok.xml", "<a/>"),
            TestFile {
                name: "boom.xml",
                delay: Duration::ZERO,
                behaviour: Behaviour::Panic,
            },
        ];
        let fault = convert_batch(files, ConvertOptions::default())
            .await
            .unwrap_err();
        assert_eq!(fault.detail, "reader exploded");
    }

    #[tokio::test]
    async fn boxed_sources_can_be_mixed() {
        let files: Vec<Box<dyn RawFile>> = vec![
            Box::new(TestFile::ok("a.xml", "<a>x</a>")),
            Box::new(TestFile {
                name: "b.xml",
                delay: Duration::ZERO,
                behaviour: Behaviour::Fail,
            }),
        ];
        let results = convert_batch(files, ConvertOptions::default()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].is_error());
    }
}
