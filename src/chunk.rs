//! Paragraph-boundary, token-bounded text chunker.
//!
//! Splits plain text into paragraphs on blank lines, then packs them
//! greedily into [`Chunk`]s that fit a `max_tokens` budget. A paragraph
//! that alone exceeds the budget is force-split into token windows of
//! `max_tokens` tokens, consecutive windows sharing `overlap` tokens.
//!
//! Overlap only applies to force-split windows. Chunks produced by
//! paragraph packing never share content with their neighbours.
//!
//! Token counts always come from re-tokenizing the whole candidate text:
//! subword tokenizers can merge across the `\n\n` join, so counts are
//! not additive.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::Chunk;
use crate::tokenizer::{Tokenizer, TokenizerError};

const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("max_tokens must be > 0")]
    ZeroBudget,
    #[error("overlap ({overlap}) must be smaller than max_tokens ({max_tokens})")]
    OverlapTooLarge { overlap: usize, max_tokens: usize },
    #[error(transparent)]
    Decode(#[from] TokenizerError),
}

/// Token budget for one chunking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkOptions {
    max_tokens: usize,
    overlap: usize,
}

impl ChunkOptions {
    /// Rejects budgets whose force-split stride would not advance.
    pub fn new(max_tokens: usize, overlap: usize) -> Result<Self, ChunkError> {
        if max_tokens == 0 {
            return Err(ChunkError::ZeroBudget);
        }
        if overlap >= max_tokens {
            return Err(ChunkError::OverlapTooLarge {
                overlap,
                max_tokens,
            });
        }
        Ok(Self {
            max_tokens,
            overlap,
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn stride(&self) -> usize {
        self.max_tokens - self.overlap
    }
}

/// Split raw text into trimmed, non-empty paragraphs, in order.
pub fn split_paragraphs(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Pack paragraphs into chunk texts under `opts`.
pub fn chunk_paragraphs<'a, T, I>(
    paragraphs: I,
    tokenizer: &T,
    opts: &ChunkOptions,
) -> Result<Vec<String>, ChunkError>
where
    T: Tokenizer + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut chunks = Vec::new();
    let mut current_buf = String::new();
    let mut current_tokens = 0usize;

    for para in paragraphs {
        let para_tokens = tokenizer.count(para);

        if current_tokens + para_tokens <= opts.max_tokens {
            if current_buf.is_empty() {
                current_buf.push_str(para);
                current_tokens = para_tokens;
                continue;
            }
            let candidate = format!("{}{}{}", current_buf, PARAGRAPH_SEPARATOR, para);
            let candidate_tokens = tokenizer.count(&candidate);
            // The separator itself costs tokens, so the joined text can overshoot.
            if candidate_tokens <= opts.max_tokens {
                current_buf = candidate;
                current_tokens = candidate_tokens;
                continue;
            }
        }

        if !current_buf.is_empty() {
            chunks.push(std::mem::take(&mut current_buf));
        }

        if para_tokens <= opts.max_tokens {
            current_buf.push_str(para);
            current_tokens = para_tokens;
        } else {
            force_split(para, tokenizer, opts, &mut chunks)?;
            current_tokens = 0;
        }
    }

    if !current_buf.is_empty() {
        chunks.push(current_buf);
    }

    Ok(chunks)
}

/// Emit `para` as overlapping token windows of `max_tokens` tokens.
fn force_split<T>(
    para: &str,
    tokenizer: &T,
    opts: &ChunkOptions,
    out: &mut Vec<String>,
) -> Result<(), ChunkError>
where
    T: Tokenizer + ?Sized,
{
    let tokens = tokenizer.encode(para);
    let before = out.len();

    let mut start = 0;
    while start < tokens.len() {
        let end = (start + opts.max_tokens).min(tokens.len());
        out.push(tokenizer.decode(&tokens[start..end])?);
        start += opts.stride();
    }

    tracing::debug!(
        tokens = tokens.len(),
        windows = out.len() - before,
        max_tokens = opts.max_tokens,
        overlap = opts.overlap,
        "force-split oversized paragraph"
    );
    Ok(())
}

/// Chunk a whole document.
///
/// `input_id` names the source (usually the input path) and prefixes
/// every chunk id. Indices start at 1. Empty input yields no chunks.
pub fn chunk_text<T>(
    input_id: &str,
    text: &str,
    tokenizer: &T,
    opts: &ChunkOptions,
) -> Result<Vec<Chunk>, ChunkError>
where
    T: Tokenizer + ?Sized,
{
    let texts = chunk_paragraphs(split_paragraphs(text), tokenizer, opts)?;

    Ok(texts
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            let token_count = tokenizer.count(&t);
            make_chunk(input_id, i + 1, t, token_count)
        })
        .collect())
}

fn make_chunk(input_id: &str, index: usize, text: String, token_count: usize) -> Chunk {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    Chunk {
        id: format!("{}#chunk-{}", input_id, index),
        text,
        token_count,
        index,
        hash,
    }
}
