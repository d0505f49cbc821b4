//! The `chunk` command: plain text in, JSONL chunk records out.

use anyhow::{Context, Result};
use std::path::Path;

use crate::chunk::{chunk_text, ChunkOptions};
use crate::config::ChunkingConfig;
use crate::sink;
use crate::tokenizer;

/// Chunk the UTF-8 text file `input` into `output`.
///
/// The tokenizer is resolved once from `settings.model` (with fallback)
/// before any chunking happens. Chunk ids are prefixed with `input` as
/// given. Returns the number of records written.
pub fn run_chunk(input: &Path, output: &Path, settings: &ChunkingConfig) -> Result<usize> {
    let opts = ChunkOptions::new(settings.max_tokens, settings.overlap_tokens)?;

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let tokenizer = tokenizer::resolve(&settings.model)?;

    let input_id = input.display().to_string();
    let chunks = chunk_text(&input_id, &text, &tokenizer, &opts)
        .with_context(|| format!("Failed to chunk {}", input.display()))?;
    tracing::info!(
        input = %input.display(),
        chunks = chunks.len(),
        max_tokens = opts.max_tokens(),
        overlap = opts.overlap(),
        "chunked document"
    );

    sink::write_jsonl(output, &chunks)
}
