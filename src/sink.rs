//! JSON Lines output for chunk records.
//!
//! One [`Chunk`] per line, in emission order. Non-ASCII text is written
//! verbatim rather than `\u` escaped.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::Chunk;

/// Write `chunks` to any writer, one JSON object per line.
pub fn write_records<W: Write>(mut writer: W, chunks: &[Chunk]) -> Result<usize> {
    for chunk in chunks {
        serde_json::to_writer(&mut writer, chunk)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(chunks.len())
}

/// Create (or truncate) `path` and write `chunks` as JSONL.
///
/// Returns the number of records written.
pub fn write_jsonl(path: &Path, chunks: &[Chunk]) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let written = write_records(BufWriter::new(file), chunks)
        .with_context(|| format!("Failed to write chunks to {}", path.display()))?;

    tracing::info!(path = %path.display(), chunks = written, "wrote chunk records");
    Ok(written)
}
