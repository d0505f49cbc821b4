//! OCR extraction for scanned PDFs.
//!
//! Each page is rasterized with `pdftoppm` (poppler) at the configured
//! resolution, then recognized with `tesseract` for the configured
//! language set. Both are external programs driven through
//! [`std::process::Command`]; the [`PageRenderer`] and [`TextRecognizer`]
//! traits are the seams between the page loop and those tools.
//!
//! Rendered images live in a [`tempfile::TempDir`] that is removed when
//! the run ends, whether it succeeds or not.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::OcrConfig;
use crate::extract::ExtractError;
use crate::models::PageSummary;

/// File name prefix handed to `pdftoppm`; pages come back as `page-N.png`.
const PAGE_PREFIX: &str = "page";

/// Rasterizes every page of a PDF into image files.
pub trait PageRenderer {
    /// Render `pdf` at `dpi` into `out_dir`, returning image paths in page order.
    fn render(&self, pdf: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractError>;
}

/// Recognizes the text in one page image.
pub trait TextRecognizer {
    /// `languages` is a `+`-separated language set, e.g. `por+eng`.
    fn recognize(&self, image: &Path, languages: &str) -> Result<String, ExtractError>;
}

/// [`PageRenderer`] backed by poppler's `pdftoppm`.
pub struct PdftoppmRenderer {
    program: PathBuf,
}

impl PdftoppmRenderer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render(&self, pdf: &Path, dpi: u32, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(out_dir.join(PAGE_PREFIX));
        run_tool(&mut cmd, "pdftoppm")?;

        collect_rendered_pages(out_dir)
    }
}

/// [`TextRecognizer`] backed by the `tesseract` CLI.
pub struct TesseractRecognizer {
    program: PathBuf,
}

impl TesseractRecognizer {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &Path, languages: &str) -> Result<String, ExtractError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg(image).arg("stdout").arg("-l").arg(languages);
        let stdout = run_tool(&mut cmd, "tesseract")?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Run `cmd` to completion and return its stdout, mapping spawn failures
/// and non-zero exits to [`ExtractError::Tool`].
fn run_tool(cmd: &mut Command, tool: &str) -> Result<Vec<u8>, ExtractError> {
    let output = cmd.output().map_err(|e| ExtractError::Tool {
        tool: tool.to_string(),
        reason: format!("could not start ({}); is it installed and on PATH?", e),
    })?;

    if !output.status.success() {
        return Err(ExtractError::Tool {
            tool: tool.to_string(),
            reason: format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(output.stdout)
}

/// Page images written by `pdftoppm` into `dir`, ordered by page number.
///
/// `pdftoppm` zero-pads the page number to the width of the page count,
/// so names are sorted numerically rather than lexically.
fn collect_rendered_pages(dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let mut pages: Vec<(u32, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let number = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_prefix(PAGE_PREFIX))
            .and_then(|s| s.strip_prefix('-'))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(n) = number {
            pages.push((n, path));
        }
    }
    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, p)| p).collect())
}

/// Delimiter line that opens OCR page `page` (1-based).
pub fn ocr_page_marker(page: usize) -> String {
    format!("\n\n=== PAGE {} (OCR) ===\n\n", page)
}

/// Recognize each image in order and write it behind an OCR delimiter.
/// Recognized text is written verbatim, even when empty.
pub fn write_ocr_pages<W, R>(
    mut writer: W,
    images: &[PathBuf],
    recognizer: &R,
    languages: &str,
) -> Result<PageSummary, ExtractError>
where
    W: Write,
    R: TextRecognizer + ?Sized,
{
    let mut summary = PageSummary::default();

    for (i, image) in images.iter().enumerate() {
        let page = i + 1;
        writer.write_all(ocr_page_marker(page).as_bytes())?;
        let text = recognizer.recognize(image, languages)?;
        tracing::debug!(page, chars = text.len(), "recognized page");
        if text.trim().is_empty() {
            summary.empty_pages += 1;
        }
        writer.write_all(text.as_bytes())?;
        summary.pages += 1;
    }

    writer.flush()?;
    Ok(summary)
}

/// Render `input`, OCR every page, and write the result to `output`.
///
/// Rendering happens before `output` is created, so a PDF that cannot be
/// rasterized leaves no partial file behind.
pub fn ocr_document<P, R>(
    input: &Path,
    output: &Path,
    renderer: &P,
    recognizer: &R,
    dpi: u32,
    languages: &str,
) -> Result<PageSummary>
where
    P: PageRenderer + ?Sized,
    R: TextRecognizer + ?Sized,
{
    let scratch = tempfile::Builder::new()
        .prefix("pdf-chunker-ocr")
        .tempdir()
        .context("Failed to create scratch directory for page images")?;

    let images = renderer
        .render(input, dpi, scratch.path())
        .with_context(|| format!("Failed to render pages of {}", input.display()))?;
    tracing::info!(input = %input.display(), pages = images.len(), dpi, "rendered pages");

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let summary = write_ocr_pages(BufWriter::new(file), &images, recognizer, languages)
        .with_context(|| format!("Failed to OCR {}", input.display()))?;

    Ok(summary)
}

/// OCR `input` into `output` with the poppler/tesseract tools named in `config`.
pub fn run_ocr(input: &Path, output: &Path, config: &OcrConfig) -> Result<PageSummary> {
    let renderer = PdftoppmRenderer::new(&config.pdftoppm);
    let recognizer = TesseractRecognizer::new(&config.tesseract);
    ocr_document(
        input,
        output,
        &renderer,
        &recognizer,
        config.dpi,
        &config.languages,
    )
}
