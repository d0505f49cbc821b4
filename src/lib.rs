//! # pdf-chunker
//!
//! Turn PDFs into text and text into token-bounded chunks for LLM and
//! embedding pipelines.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   text    ┌─────────────┐   JSONL   ┌──────────────┐
//! │ extract_text │──────────▶│    chunk    │──────────▶│  embedder /  │
//! │   ocr_pdf    │  per page │ para+tokens │  records  │  LLM ingest  │
//! └──────────────┘           └─────────────┘           └──────────────┘
//! ```
//!
//! The three binaries run independently; each takes an input path and an
//! output path.
//!
//! ```bash
//! extract_text report.pdf report.txt
//! ocr_pdf scan.pdf scan.txt --dpi 300 --lang por+eng
//! chunk report.txt report.jsonl --chunk_tokens 1500 --overlap 200 --model gpt-4o-mini
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Optional TOML configuration |
//! | [`logging`] | stderr log setup |
//! | [`models`] | Chunk and page summary types |
//! | [`tokenizer`] | Tokenizer trait and tiktoken vocabularies |
//! | [`chunk`] | Paragraph splitting and token-bounded chunking |
//! | [`chunk_cmd`] | The `chunk` command |
//! | [`sink`] | JSONL chunk output |
//! | [`extract`] | Text-layer PDF extraction |
//! | [`ocr`] | Rasterize + OCR PDF extraction |

pub mod chunk;
pub mod chunk_cmd;
pub mod config;
pub mod extract;
pub mod logging;
pub mod models;
pub mod ocr;
pub mod sink;
pub mod tokenizer;
