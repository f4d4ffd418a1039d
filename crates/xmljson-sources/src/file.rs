//! Filesystem source — reads a path with `tokio::fs`.

use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use xmljson_core::RawFile;

/// A file on disk. Its name is the final path component, the way a file
/// picker reports it.
#[derive(Debug, Clone)]
pub struct PathFile {
    path: PathBuf,
    name: String,
}

impl PathFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawFile for PathFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(async move {
            tracing::debug!(path = %self.path.display(), "reading file");
            tokio::fs::read(&self.path).await
        })
    }
}
