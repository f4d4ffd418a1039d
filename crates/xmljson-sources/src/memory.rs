//! In-memory source — content already held by the caller.

use futures::future::BoxFuture;
use xmljson_core::RawFile;

#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    content: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

impl RawFile for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(async move { Ok(self.content.clone()) })
    }
}
