//! xmljson — convert XML documents into normalized JSON.
//!
//! The workspace is split into three layers, re-exported here so that
//! integration tests and benches can import them from one place.
//!
//! # Architecture
//!
//! ```text
//! Sources ──► Batch converter ──► Output JSON ──► Session ──► TUI / headless
//! (path, stdin)   (xml → tree → normalize)          (reset, copy, visibility)
//! ```
//!
//! Conversions run as tokio tasks; the UI drives the main thread.

pub mod headless;

pub use xmljson_core;
pub use xmljson_sources;
pub use xmljson_tui;
