//! Output rendering — the single JSON string exposed to the embedding layer.
//!
//! A completed batch renders as the array of per-file results; a batch fault
//! renders as `{"error": …, "detail": …}`. Rendering itself cannot fail.

use crate::batch::BatchFault;
use crate::types::BatchResult;
use serde::Serialize;

/// Summary text placed in the `error` key of a batch-fault object.
pub const BATCH_FAULT_SUMMARY: &str = "Failed to process files";

/// Everything a batch can produce, ready to serialise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutput {
    Results(BatchResult),
    Fault { error: String, detail: String },
}

impl From<Result<BatchResult, BatchFault>> for BatchOutput {
    fn from(result: Result<BatchResult, BatchFault>) -> Self {
        match result {
            Ok(results) => BatchOutput::Results(results),
            Err(fault) => BatchOutput::Fault {
                error: BATCH_FAULT_SUMMARY.to_string(),
                detail: fault.detail,
            },
        }
    }
}

impl BatchOutput {
    pub fn is_fault(&self) -> bool {
        matches!(self, BatchOutput::Fault { .. })
    }

    /// Number of per-file results that carry an error (0 for a fault).
    pub fn failed_files(&self) -> usize {
        match self {
            BatchOutput::Results(results) => results.iter().filter(|r| r.is_error()).count(),
            BatchOutput::Fault { .. } => 0,
        }
    }

    /// Pretty-printed JSON with 2-space indentation.
    pub fn to_json(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                let fallback = serde_json::json!({
                    "error": BATCH_FAULT_SUMMARY,
                    "detail": err.to_string(),
                });
                format!("{fallback:#}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
