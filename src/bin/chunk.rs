//! # `chunk`
//!
//! Split a plain-text file into token-bounded chunks, one JSON record per
//! line.
//!
//! ```bash
//! chunk full_text.txt chunks.jsonl --chunk_tokens 1500 --overlap 200 --model gpt-4o-mini
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use pdf_chunker::{chunk_cmd, config::Config, logging};

/// Split a plain-text file into overlapping, token-bounded chunks.
///
/// Paragraphs (separated by blank lines) are packed greedily up to the
/// token budget. A paragraph larger than the budget is cut into token
/// windows that overlap by `--overlap` tokens.
#[derive(Parser)]
#[command(name = "chunk", version)]
struct Cli {
    /// Plain-text input file (UTF-8).
    input: PathBuf,

    /// JSONL output file, created or truncated.
    output: PathBuf,

    /// Maximum tokens per chunk [default: 1500].
    #[arg(long = "chunk_tokens", visible_alias = "chunk-tokens")]
    chunk_tokens: Option<usize>,

    /// Tokens shared by consecutive windows of a force-split paragraph [default: 200].
    #[arg(long)]
    overlap: Option<usize>,

    /// Model whose tokenizer to use; unknown names fall back to cl100k_base
    /// [default: gpt-4o-mini].
    #[arg(long)]
    model: Option<String>,

    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut cfg = Config::load_or_default(cli.config.as_deref())?;
    if let Some(max_tokens) = cli.chunk_tokens {
        cfg.chunking.max_tokens = max_tokens;
    }
    if let Some(overlap) = cli.overlap {
        cfg.chunking.overlap_tokens = overlap;
    }
    if let Some(model) = cli.model {
        cfg.chunking.model = model;
    }
    cfg.validate()?;

    let written = chunk_cmd::run_chunk(&cli.input, &cli.output, &cfg.chunking)?;
    println!("Wrote {} chunks to {}", written, cli.output.display());

    Ok(())
}
