//! Stdin source — reads standard input to EOF.
//!
//! Standard input can be consumed only once per process. Clones of one
//! [`StdinFile`] share a single read: whichever clone is read first drains
//! stdin, and every other clone waits for it and gets the same bytes.
//! [`crate::from_args`] hands every `-` in a batch the same clone set.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::OnceCell;
use xmljson_core::RawFile;

/// Name reported for standard input.
pub const STDIN_NAME: &str = "stdin";

#[derive(Debug, Clone, Default)]
pub struct StdinFile {
    content: Arc<OnceCell<Vec<u8>>>,
}

impl StdinFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain `reader` once for all clones. A failed read is not cached, so
    /// the next caller reads whatever is left.
    async fn read_shared<R>(&self, reader: R) -> std::io::Result<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let content = self
            .content
            .get_or_try_init(|| async move {
                let mut reader = reader;
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).await?;
                tracing::debug!(bytes = buf.len(), "stdin read to EOF");
                Ok::<_, std::io::Error>(buf)
            })
            .await?;
        Ok(content.clone())
    }
}

impl RawFile for StdinFile {
    fn name(&self) -> &str {
        STDIN_NAME
    }

    fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(self.read_shared(tokio::io::stdin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clones_share_one_read() {
        let first = StdinFile::new();
        let second = first.clone();
        let (a, b) = tokio::join!(
            first.read_shared(&b"<a/>"[..]),
            second.read_shared(&b"<never/>"[..]),
        );
        assert_eq!(a.unwrap(), b"<a/>");
        assert_eq!(b.unwrap(), b"<a/>");
    }

    #[tokio::test]
    async fn separate_files_read_separately() {
        let a = StdinFile::new().read_shared(&b"1"[..]).await.unwrap();
        let b = StdinFile::new().read_shared(&b"2"[..]).await.unwrap();
        assert_eq!((a, b), (b"1".to_vec(), b"2".to_vec()));
    }
}
