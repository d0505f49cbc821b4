//! # `extract_text`
//!
//! Dump the text layer of a PDF, page by page.
//!
//! ```bash
//! extract_text input.pdf output.txt
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pdf_chunker::{config::Config, extract, logging};

/// Extract the embedded text of every PDF page.
///
/// Each page is introduced by `=== PAGE n ===`. Pages with no text layer
/// (scans, images) are marked so they can be sent through `ocr_pdf`.
#[derive(Parser)]
#[command(name = "extract_text", version)]
struct Cli {
    /// PDF to read.
    input: PathBuf,

    /// Text file to write, created or truncated.
    output: PathBuf,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    // Nothing here is configurable yet, but a bad file should still fail loudly.
    Config::load_or_default(cli.config.as_deref())?;

    let summary = extract::run_extract(&cli.input, &cli.output)?;
    println!(
        "Wrote {} pages to {} ({} without text)",
        summary.pages,
        cli.output.display(),
        summary.empty_pages
    );

    Ok(())
}
