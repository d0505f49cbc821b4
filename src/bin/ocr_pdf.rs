//! # `ocr_pdf`
//!
//! OCR every page of a PDF with poppler's `pdftoppm` and `tesseract`.
//!
//! ```bash
//! ocr_pdf input.pdf output.txt --dpi 300 --lang por+eng
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pdf_chunker::{config::Config, logging, ocr};

/// Rasterize each PDF page and run OCR on it.
///
/// Each page is introduced by `=== PAGE n (OCR) ===`. Requires `pdftoppm`
/// and `tesseract` (with the requested language data) to be installed.
#[derive(Parser)]
#[command(name = "ocr_pdf", version)]
struct Cli {
    /// PDF to read.
    input: PathBuf,

    /// Text file to write, created or truncated.
    output: PathBuf,

    /// Rasterization resolution in pixels per inch [default: 300].
    #[arg(long)]
    dpi: Option<u32>,

    /// Tesseract languages, `+`-separated [default: por+eng].
    #[arg(long = "lang")]
    languages: Option<String>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut cfg = Config::load_or_default(cli.config.as_deref())?;
    if let Some(dpi) = cli.dpi {
        cfg.ocr.dpi = dpi;
    }
    if let Some(languages) = cli.languages {
        cfg.ocr.languages = languages;
    }
    cfg.validate()?;

    let summary = ocr::run_ocr(&cli.input, &cli.output, &cfg.ocr)?;
    println!(
        "Wrote {} OCR pages to {}",
        summary.pages,
        cli.output.display()
    );

    Ok(())
}
