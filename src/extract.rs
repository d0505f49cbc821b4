//! Text-layer PDF extraction.
//!
//! Pulls the embedded text of every page with `pdf-extract` and writes it
//! out page by page behind `=== PAGE n ===` delimiters. Pages without a
//! text layer (typically scans) get a sentinel line instead, so the
//! output always has one section per page.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::models::PageSummary;

/// Written in place of the text of a page that has none.
pub const NO_TEXT_SENTINEL: &str = "[NO TEXT ON PAGE - POSSIBLE SCAN/IMAGE PAGE]\n";

/// Extraction error. The binaries treat every variant as fatal.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("{tool} failed: {reason}")]
    Tool { tool: String, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Delimiter line that opens page `page` (1-based).
pub fn page_marker(page: usize) -> String {
    format!("\n\n=== PAGE {} ===\n\n", page)
}

/// Per-page text of the PDF at `path`, in page order.
pub fn extract_pages(path: &Path) -> Result<Vec<String>, ExtractError> {
    pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Write `pages` with delimiters, substituting [`NO_TEXT_SENTINEL`] for
/// pages whose text is empty or whitespace only.
pub fn write_text_pages<W: Write>(mut writer: W, pages: &[String]) -> io::Result<PageSummary> {
    let mut summary = PageSummary::default();

    for (i, text) in pages.iter().enumerate() {
        let page = i + 1;
        writer.write_all(page_marker(page).as_bytes())?;
        if text.trim().is_empty() {
            tracing::warn!(page, "no text layer on page; possible scan or image");
            writer.write_all(NO_TEXT_SENTINEL.as_bytes())?;
            summary.empty_pages += 1;
        } else {
            writer.write_all(text.as_bytes())?;
        }
        summary.pages += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// Extract `input` and write the delimited text to `output`.
pub fn run_extract(input: &Path, output: &Path) -> Result<PageSummary> {
    let pages = extract_pages(input)
        .with_context(|| format!("Failed to extract text from {}", input.display()))?;
    tracing::debug!(input = %input.display(), pages = pages.len(), "extracted text layer");

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let summary = write_text_pages(BufWriter::new(file), &pages)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(summary)
}
