//! Optional TOML configuration shared by the three binaries.
//!
//! No file is read unless `--config` is passed. Every field has a
//! built-in default, and explicit command-line flags win over both.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_overlap")]
    pub overlap_tokens: usize,
    /// Model whose vocabulary the token counts should approximate.
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_tokens: default_overlap(),
            model: default_model(),
        }
    }
}

fn default_max_tokens() -> usize {
    1500
}
fn default_overlap() -> usize {
    200
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Rasterization resolution in pixels per inch.
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Tesseract language set, `+`-separated (e.g. `por+eng`).
    #[serde(default = "default_languages")]
    pub languages: String,
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: PathBuf,
    #[serde(default = "default_tesseract")]
    pub tesseract: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            languages: default_languages(),
            pdftoppm: default_pdftoppm(),
            tesseract: default_tesseract(),
        }
    }
}

fn default_dpi() -> u32 {
    300
}
fn default_languages() -> String {
    "por+eng".to_string()
}
fn default_pdftoppm() -> PathBuf {
    PathBuf::from("pdftoppm")
}
fn default_tesseract() -> PathBuf {
    PathBuf::from("tesseract")
}

impl Config {
    /// Load `path` if given, otherwise return the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => load_config(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunking.max_tokens == 0 {
            anyhow::bail!("chunking.max_tokens must be > 0");
        }
        if self.chunking.overlap_tokens >= self.chunking.max_tokens {
            anyhow::bail!(
                "chunking.overlap_tokens ({}) must be smaller than chunking.max_tokens ({})",
                self.chunking.overlap_tokens,
                self.chunking.max_tokens
            );
        }
        if self.ocr.dpi == 0 {
            anyhow::bail!("ocr.dpi must be > 0");
        }
        if self.ocr.languages.trim().is_empty() {
            anyhow::bail!("ocr.languages must not be empty");
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_script_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.chunking.max_tokens, 1500);
        assert_eq!(cfg.chunking.overlap_tokens, 200);
        assert_eq!(cfg.chunking.model, "gpt-4o-mini");
        assert_eq!(cfg.ocr.dpi, 300);
        assert_eq!(cfg.ocr.languages, "por+eng");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str("[chunking]\nmax_tokens = 800\n").unwrap();
        assert_eq!(cfg.chunking.max_tokens, 800);
        assert_eq!(cfg.chunking.overlap_tokens, 200);
        assert_eq!(cfg.ocr.dpi, 300);
    }

    #[test]
    fn overlap_must_be_below_budget() {
        let cfg: Config =
            toml::from_str("[chunking]\nmax_tokens = 100\noverlap_tokens = 100\n").unwrap();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("overlap_tokens"));
    }

    #[test]
    fn zero_dpi_rejected() {
        let cfg: Config = toml::from_str("[ocr]\ndpi = 0\n").unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/pdf-chunker.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chunker.toml");
        std::fs::write(
            &path,
            "[chunking]\nmodel = \"gpt-4\"\n\n[ocr]\nlanguages = \"eng\"\ndpi = 150\n",
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.chunking.model, "gpt-4");
        assert_eq!(cfg.ocr.languages, "eng");
        assert_eq!(cfg.ocr.dpi, 150);
    }
}
