//! Token counting for chunk budgets.
//!
//! The chunker only sees the [`Tokenizer`] trait. [`TiktokenTokenizer`]
//! wraps a `tiktoken_rs::CoreBPE` vocabulary chosen by model name; the
//! choice (including the fallback for unknown models) is made once by
//! [`resolve`] and the result is passed down explicitly.

use thiserror::Error;
use tiktoken_rs::{cl100k_base, get_bpe_from_model, CoreBPE};

/// Vocabulary used when a model name is not recognised.
pub const FALLBACK_ENCODING: &str = "cl100k_base";

/// Upper bound on tokens that can hold the bytes of one split character.
const MAX_PARTIAL_TOKENS: usize = 4;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("failed to load tokenizer vocabulary '{name}': {reason}")]
    Load { name: String, reason: String },
    #[error("could not decode a window of {tokens} tokens back to text")]
    Decode { tokens: usize },
}

/// Maps text to token ids and back.
///
/// Implementations must be deterministic: the same text always encodes
/// to the same ids.
pub trait Tokenizer {
    /// Identifier of the vocabulary in use (for logs and diagnostics).
    fn name(&self) -> &str;

    fn encode(&self, text: &str) -> Vec<u32>;

    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError>;

    fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}

pub struct TiktokenTokenizer {
    name: String,
    bpe: CoreBPE,
}

impl TiktokenTokenizer {
    /// Tokenizer for a known model name (e.g. `gpt-4o-mini`, `gpt-4`).
    pub fn for_model(model: &str) -> Result<Self, TokenizerError> {
        let bpe = get_bpe_from_model(model).map_err(|e| TokenizerError::Load {
            name: model.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: model.to_string(),
            bpe,
        })
    }

    /// The general-purpose `cl100k_base` vocabulary.
    pub fn cl100k() -> Result<Self, TokenizerError> {
        let bpe = cl100k_base().map_err(|e| TokenizerError::Load {
            name: FALLBACK_ENCODING.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            name: FALLBACK_ENCODING.to_string(),
            bpe,
        })
    }

    fn decode_strict(&self, tokens: &[u32]) -> Option<String> {
        self.bpe.decode(tokens.to_vec()).ok()
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe
            .encode_with_special_tokens(text)
            .into_iter()
            .map(|t| t as u32)
            .collect()
    }

    /// Decodes `tokens`, replacing a character cut in half at either edge
    /// of the window with U+FFFD.
    fn decode(&self, tokens: &[u32]) -> Result<String, TokenizerError> {
        if let Some(text) = self.decode_strict(tokens) {
            return Ok(text);
        }

        // Windows come from valid UTF-8, so only the edges can be partial.
        for trimmed in 1..=2 * MAX_PARTIAL_TOKENS {
            for head in 0..=trimmed.min(MAX_PARTIAL_TOKENS) {
                let tail = trimmed - head;
                if tail > MAX_PARTIAL_TOKENS || head + tail > tokens.len() {
                    continue;
                }
                if let Some(text) = self.decode_strict(&tokens[head..tokens.len() - tail]) {
                    let mut out = String::with_capacity(text.len() + 6);
                    if head > 0 {
                        out.push(char::REPLACEMENT_CHARACTER);
                    }
                    out.push_str(&text);
                    if tail > 0 {
                        out.push(char::REPLACEMENT_CHARACTER);
                    }
                    return Ok(out);
                }
            }
        }

        Err(TokenizerError::Decode {
            tokens: tokens.len(),
        })
    }
}

/// Pick the tokenizer for `model`, falling back to `cl100k_base` when the
/// name is unknown. Only a failure to load the fallback itself is an error.
pub fn resolve(model: &str) -> Result<TiktokenTokenizer, TokenizerError> {
    match TiktokenTokenizer::for_model(model) {
        Ok(tok) => {
            tracing::debug!(model, "resolved tokenizer");
            Ok(tok)
        }
        Err(e) => {
            tracing::warn!(
                model,
                fallback = FALLBACK_ENCODING,
                error = %e,
                "unknown tokenizer model, using fallback vocabulary"
            );
            TiktokenTokenizer::cl100k()
        }
    }
}
