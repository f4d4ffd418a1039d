//! xmljson-core — XML to JSON conversion core.
//!
//! This crate exposes the conversion pipeline as public modules, plus the
//! session state the embedding layers (terminal UI, headless CLI) build on.
//!
//! # Architecture
//!
//! ```text
//! RawFile ──► xml::parse_document ──► normalizer::normalize ──► ConversionResult
//!    (one tokio task per file, gathered in input order by batch::convert_batch)
//!                                                        │
//!                               output::BatchOutput ◄────┘
//!                                        │
//!                               session::Session (output property, reset, copy)
//! ```

pub mod batch;
pub mod config;
pub mod normalizer;
pub mod output;
pub mod session;
pub mod types;
pub mod xml;

pub use batch::{convert_batch, convert_bytes, BatchFault, ConvertOptions, RawFile};
pub use normalizer::normalize;
pub use output::BatchOutput;
pub use session::{CopyAction, Session};
pub use types::{BatchResult, ConversionResult, Outcome, XmlElement, XmlNode};
