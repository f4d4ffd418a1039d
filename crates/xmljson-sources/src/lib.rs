//! xmljson-sources — raw file adapters for xmljson.
//!
//! Each adapter implements [`xmljson_core::RawFile`]: a display name plus an
//! asynchronous read of the full content. The batch converter never touches
//! the filesystem itself.

pub mod file;
pub mod memory;
pub mod stdin;

pub use file::PathFile;
pub use memory::MemoryFile;
pub use stdin::StdinFile;

use xmljson_core::RawFile;

/// Command-line spelling for standard input.
pub const STDIN_ARG: &str = "-";

/// Build sources for a list of arguments, preserving their order. Every `-`
/// shares one [`StdinFile`], so repeated stdin entries get identical content.
pub fn from_args<S: AsRef<str>>(args: &[S]) -> Vec<Box<dyn RawFile>> {
    let stdin = StdinFile::new();
    args.iter()
        .map(|a| match a.as_ref() {
            STDIN_ARG => Box::new(stdin.clone()) as Box<dyn RawFile>,
            path => Box::new(PathFile::new(path)),
        })
        .collect()
}
