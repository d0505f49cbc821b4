//! Core data models shared by the chunker and the JSONL sink.

use serde::{Deserialize, Serialize};

/// One emitted chunk of a plain-text document.
///
/// Serialized as a single JSON object per line by [`crate::sink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// `{input}#chunk-{index}`.
    pub id: String,
    pub text: String,
    /// Token count of `text` under the tokenizer that produced the chunk.
    pub token_count: usize,
    /// 1-based emission order.
    pub index: usize,
    /// SHA-256 of `text`, for staleness detection downstream.
    pub hash: String,
}

/// Page counts reported by the PDF extractors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub pages: usize,
    /// Pages written with the no-text sentinel (text-layer extraction only).
    pub empty_pages: usize,
}
